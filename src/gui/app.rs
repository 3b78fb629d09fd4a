//! Radar Lens Main Application
//! Main window with control panel and dashboard view.

use crate::config::DashboardConfig;
use crate::data::{CategorySelection, RadarDataset, TechnologyEntry};
use crate::gui::{ControlPanel, ControlPanelAction, DashboardView};
use crate::stats::{RadarReport, ReportError};
use egui::{ScrollArea, SidePanel};

/// Main application window.
///
/// Every range change re-runs the whole filter/aggregate pipeline; table
/// filter changes only re-run the table query.
pub struct RadarApp {
    dataset: RadarDataset,
    control_panel: ControlPanel,
    view: DashboardView,
    report: Result<RadarReport, ReportError>,
    table: Vec<TechnologyEntry>,
}

impl RadarApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: RadarDataset,
        config: &DashboardConfig,
    ) -> Self {
        let (start, end) = config.initial_range(dataset.catalog());
        let report = RadarReport::build(&dataset, start, end);

        let mut app = Self {
            dataset,
            control_panel: ControlPanel::new(start, end),
            view: DashboardView::new(),
            report,
            table: Vec::new(),
        };
        app.on_report_built();
        app
    }

    /// Rebuild the report for the current start/end selection.
    fn rebuild_report(&mut self) {
        self.report = RadarReport::build(
            &self.dataset,
            self.control_panel.start_volume,
            self.control_panel.end_volume,
        );
        self.on_report_built();
    }

    fn on_report_built(&mut self) {
        match &self.report {
            Ok(report) => {
                log::debug!(
                    "Report for {} covers {} entries",
                    report.range,
                    report.entry_count()
                );
                self.control_panel
                    .reset_selection(report.default_selection());
                self.view.reset(report);
            }
            Err(err) => {
                log::warn!("Skipping render pass: {}", err);
                self.control_panel
                    .reset_selection(CategorySelection::default());
            }
        }
        self.refresh_table();
    }

    /// Re-run the table query with the current multiselect state.
    fn refresh_table(&mut self) {
        self.table = match &self.report {
            Ok(report) => match report.table_entries(&self.control_panel.selection) {
                Ok(rows) => rows,
                Err(err) => {
                    log::error!("Table filter failed: {}", err);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
    }
}

impl eframe::App for RadarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, self.dataset.catalog());

                    match action {
                        ControlPanelAction::RangeChanged => self.rebuild_report(),
                        ControlPanelAction::SelectionChanged => self.refresh_table(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match &self.report {
                    Ok(report) => {
                        self.view
                            .show(ui, report, &self.table, self.dataset.source())
                    }
                    Err(err) => DashboardView::show_error(ui, err),
                });
        });
    }
}
