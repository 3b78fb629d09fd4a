//! Chart Plotter Module
//! Draws the radar aggregates as interactive egui_plot charts.

use crate::stats::{CategoryCounts, CumulativeRow, NoveltyCounts};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

const CHART_HEIGHT: f32 = 320.0;
const GROUP_WIDTH: f64 = 0.8;

/// Pastel qualitative palette for category series.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(102, 197, 204), // Teal
    Color32::from_rgb(246, 207, 113), // Sand
    Color32::from_rgb(248, 156, 116), // Salmon
    Color32::from_rgb(220, 176, 242), // Lilac
    Color32::from_rgb(135, 197, 95),  // Leaf
    Color32::from_rgb(158, 185, 243), // Periwinkle
    Color32::from_rgb(254, 136, 177), // Pink
    Color32::from_rgb(201, 219, 116), // Lime
    Color32::from_rgb(139, 224, 164), // Mint
    Color32::from_rgb(180, 151, 231), // Lavender
];

pub const EXISTING_COLOR: Color32 = Color32::from_rgb(255, 179, 186);
pub const NEW_COLOR: Color32 = Color32::from_rgb(186, 255, 201);
pub const TOTAL_LINE_COLOR: Color32 = Color32::from_rgb(255, 107, 107);
pub const NEW_LINE_COLOR: Color32 = Color32::from_rgb(78, 205, 196);

/// How category series share a volume's slot on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    /// Side by side within the volume slot.
    Grouped,
    /// On top of each other.
    Stacked,
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn category_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Integer volume ticks only; fractional grid marks stay unlabeled.
    pub fn volume_tick(value: f64) -> String {
        if value >= 0.0 && (value - value.round()).abs() < 1e-6 {
            format!("{}", value.round() as u32)
        } else {
            String::new()
        }
    }

    /// Centre of bar `index` out of `count` series in one volume slot.
    pub fn bar_offset(mode: BarMode, index: usize, count: usize) -> f64 {
        match mode {
            BarMode::Stacked => 0.0,
            BarMode::Grouped => {
                let width = GROUP_WIDTH / count.max(1) as f64;
                -GROUP_WIDTH / 2.0 + width * (index as f64 + 0.5)
            }
        }
    }

    fn bar_width(mode: BarMode, count: usize) -> f64 {
        match mode {
            BarMode::Stacked => GROUP_WIDTH,
            BarMode::Grouped => GROUP_WIDTH / count.max(1) as f64,
        }
    }

    /// Bar chart of per-volume counts, one series per category.
    pub fn draw_category_chart(ui: &mut egui::Ui, id: &str, counts: &CategoryCounts, mode: BarMode) {
        let n_series = counts.categories.len();
        let width = Self::bar_width(mode, n_series);

        let mut charts: Vec<BarChart> = Vec::with_capacity(n_series);
        for (idx, category) in counts.categories.iter().enumerate() {
            let offset = Self::bar_offset(mode, idx, n_series);
            let bars: Vec<Bar> = counts
                .series(idx)
                .into_iter()
                .map(|(volume, count)| {
                    Bar::new(volume as f64 + offset, count as f64)
                        .width(width)
                        .name(format!("{} - Volume {}", category, volume))
                })
                .collect();

            let mut chart = BarChart::new(bars)
                .name(category)
                .color(Self::category_color(idx));
            if mode == BarMode::Stacked {
                let below: Vec<&BarChart> = charts.iter().collect();
                chart = chart.stack_on(&below);
            }
            charts.push(chart);
        }

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Volume")
            .y_axis_label("Count")
            .x_axis_formatter(|mark, _range| Self::volume_tick(mark.value))
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    }

    /// Existing vs. new technologies per volume as lines with markers.
    pub fn draw_new_vs_existing(ui: &mut egui::Ui, rows: &[NoveltyCounts]) {
        let existing: Vec<[f64; 2]> = rows
            .iter()
            .map(|r| [r.volume as f64, r.existing as f64])
            .collect();
        let new: Vec<[f64; 2]> = rows.iter().map(|r| [r.volume as f64, r.new as f64]).collect();

        Plot::new("new_vs_existing")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Volume")
            .y_axis_label("Count")
            .x_axis_formatter(|mark, _range| Self::volume_tick(mark.value))
            .show(ui, |plot_ui| {
                for (name, points, color) in [
                    ("Existing", existing, EXISTING_COLOR),
                    ("New", new, NEW_COLOR),
                ] {
                    plot_ui.line(
                        Line::new(PlotPoints::from(points.clone()))
                            .color(color)
                            .width(2.0)
                            .name(name),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .radius(5.0)
                            .color(color)
                            .name(name),
                    );
                }
            });
    }

    /// Filled cumulative areas with per-volume lines on top.
    pub fn draw_cumulative(ui: &mut egui::Ui, rows: &[CumulativeRow]) {
        let series = |f: fn(&CumulativeRow) -> usize| -> Vec<[f64; 2]> {
            rows.iter().map(|r| [r.volume as f64, f(r) as f64]).collect()
        };
        let cumulative_total = series(|r| r.cumulative_total);
        let cumulative_new = series(|r| r.cumulative_new);
        let total = series(|r| r.total);
        let new = series(|r| r.new);

        Plot::new("cumulative_new_vs_total")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Volume")
            .y_axis_label("Count")
            .x_axis_formatter(|mark, _range| Self::volume_tick(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(cumulative_total))
                        .color(EXISTING_COLOR.gamma_multiply(0.5))
                        .fill(0.0_f32)
                        .name("Total"),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from(cumulative_new))
                        .color(NEW_COLOR.gamma_multiply(0.5))
                        .fill(0.0_f32)
                        .name("New"),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from(total))
                        .color(TOTAL_LINE_COLOR)
                        .width(2.0)
                        .name("Total (per volume)"),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from(new))
                        .color(NEW_LINE_COLOR)
                        .width(2.0)
                        .name("New (per volume)"),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_ticks_are_integers_only() {
        assert_eq!(ChartPlotter::volume_tick(28.0), "28");
        assert_eq!(ChartPlotter::volume_tick(28.5), "");
        assert_eq!(ChartPlotter::volume_tick(-1.0), "");
    }

    #[test]
    fn grouped_bars_fill_the_slot_symmetrically() {
        let offsets: Vec<f64> = (0..4)
            .map(|i| ChartPlotter::bar_offset(BarMode::Grouped, i, 4))
            .collect();
        assert!((offsets[0] + offsets[3]).abs() < 1e-9);
        assert!((offsets[1] + offsets[2]).abs() < 1e-9);
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ChartPlotter::bar_offset(BarMode::Stacked, 2, 4), 0.0);
        assert_eq!(ChartPlotter::bar_offset(BarMode::Grouped, 0, 1), 0.0);
    }
}
