//! Dashboard View
//! Central panel: header, technology table, volume statistics, charts and occurrences.

use crate::charts::{BarMode, ChartPlotter};
use crate::data::TechnologyEntry;
use crate::stats::{CategoryCounts, RadarAggregator, RadarReport, ReportError};
use egui::{Color32, RichText, ScrollArea};
use std::path::Path;

const TABLE_HEIGHT: f32 = 320.0;
const SECTION_SPACING: f32 = 18.0;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Central dashboard; the only state it keeps is the occurrence slider.
pub struct DashboardView {
    pub min_occurrences: usize,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self { min_occurrences: 1 }
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the slider for a freshly built report.
    pub fn reset(&mut self, report: &RadarReport) {
        self.min_occurrences = RadarAggregator::default_min_occurrences(&report.occurrences);
    }

    /// Shown instead of the dashboard when a report could not be built.
    pub fn show_error(ui: &mut egui::Ui, error: &ReportError) {
        egui::Frame::none()
            .rounding(5.0)
            .stroke(egui::Stroke::new(1.5, ERROR_COLOR))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(format!("⚠ {}", error)).size(14.0).color(ERROR_COLOR));
            });
    }

    /// Draw the whole dashboard for one report.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        report: &RadarReport,
        table: &[TechnologyEntry],
        source: Option<&Path>,
    ) {
        Self::header(ui, report, source);
        ui.add_space(SECTION_SPACING);

        Self::technology_table(ui, table);
        ui.add_space(SECTION_SPACING);

        Self::volume_statistics(ui, report);
        ui.add_space(SECTION_SPACING);

        Self::section_title(ui, &Self::category_chart_title(&report.quadrant_counts));
        ChartPlotter::draw_category_chart(
            ui,
            "quadrant_chart",
            &report.quadrant_counts,
            BarMode::Grouped,
        );
        ui.add_space(SECTION_SPACING);

        Self::section_title(ui, &Self::category_chart_title(&report.ring_counts));
        ChartPlotter::draw_category_chart(ui, "ring_chart", &report.ring_counts, BarMode::Stacked);
        ui.add_space(SECTION_SPACING);

        Self::section_title(ui, "New vs. Existing Technologies by Volume");
        ChartPlotter::draw_new_vs_existing(ui, &report.novelty);
        ui.add_space(SECTION_SPACING);

        Self::section_title(ui, "Cumulative and Per-Volume New vs. Total Technologies");
        ChartPlotter::draw_cumulative(ui, &report.cumulative);
        ui.add_space(SECTION_SPACING);

        self.occurrence_table(ui, report);
        ui.add_space(SECTION_SPACING);

        Self::conclusion(ui, report);
    }

    fn section_title(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(17.0).strong());
        ui.add_space(6.0);
    }

    pub fn category_chart_title(counts: &CategoryCounts) -> String {
        format!("Technologies by {} and Volume", counts.field.title())
    }

    fn header(ui: &mut egui::Ui, report: &RadarReport, source: Option<&Path>) {
        ui.label(
            RichText::new("Technology Radar Analysis")
                .size(26.0)
                .strong(),
        );
        ui.add_space(6.0);
        ui.label(format!(
            "This app analyzes technologies from the Technology Radar, focusing on {} to {}.",
            report.start_label, report.end_label
        ));
        if let Some(path) = source {
            ui.label(
                RichText::new(format!("Data: {}", path.display()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
    }

    fn technology_table(ui: &mut egui::Ui, table: &[TechnologyEntry]) {
        Self::section_title(ui, "Technologies");
        ui.label(
            RichText::new(format!("{} entries", table.len()))
                .size(11.0)
                .color(Color32::GRAY),
        );

        ScrollArea::vertical()
            .id_salt("technology_table")
            .max_height(TABLE_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("technology_table_grid")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Name", "Ring", "Quadrant", "New", "Volume"] {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for entry in table {
                            ui.label(&entry.name);
                            ui.label(&entry.ring);
                            ui.label(&entry.quadrant);
                            ui.label(if entry.is_new { "Yes" } else { "No" });
                            ui.label(entry.volume.to_string());
                            ui.end_row();
                        }
                    });
            });
    }

    fn volume_statistics(ui: &mut egui::Ui, report: &RadarReport) {
        Self::section_title(ui, "Statistics by Volume");
        egui::CollapsingHeader::new("Volume Statistics").show(ui, |ui| {
            for summary in &report.volume_summaries {
                ui.label(
                    RichText::new(format!(
                        "Volume {} ({}):",
                        summary.volume, summary.edition
                    ))
                    .strong(),
                );
                ui.label(format!("- Total technologies: {}", summary.total));
                ui.label(format!("- New technologies: {}", summary.new));
                ui.add_space(4.0);
            }
        });
    }

    fn occurrence_table(&mut self, ui: &mut egui::Ui, report: &RadarReport) {
        Self::section_title(ui, "List of Technology Occurrences");

        let max = RadarAggregator::max_occurrences(&report.occurrences);
        self.min_occurrences = self.min_occurrences.clamp(1, max);
        ui.add(egui::Slider::new(&mut self.min_occurrences, 1..=max).text("Minimum Occurrences"));
        ui.add_space(6.0);

        let rows = report.frequent_technologies(self.min_occurrences);

        ScrollArea::vertical()
            .id_salt("occurrence_table")
            .max_height(TABLE_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("occurrence_table_grid")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Technology",
                            "Occurrences",
                            "First Occurrence Volume",
                            "Latest Ring",
                        ] {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for row in &rows {
                            ui.label(&row.technology);
                            ui.label(row.occurrences.to_string());
                            ui.label(row.first_volume.to_string());
                            ui.label(&row.latest_ring);
                            ui.end_row();
                        }
                    });
            });
    }

    fn conclusion(ui: &mut egui::Ui, report: &RadarReport) {
        Self::section_title(ui, "Conclusion");
        ui.label(format!(
            "This analysis provides insights into the technology trends across {} to {} of the \
             Technology Radar. It highlights the distribution of technologies across different \
             quadrants and rings, as well as the introduction of new technologies in each volume.",
            report.start_label, report.end_label
        ));
    }
}
