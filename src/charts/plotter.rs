//! Chart Plotter Module
//! Draws the dashboard panels using egui_plot and the egui painter.

use crate::charts::model::ScatterPoint;
use crate::data::{Metric, RepoRecord};
use crate::stats::{CategoryShare, CorrelationMatrix, GroupMeans, MetricSummary};
use egui::{Align2, Color32, FontId, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};
use std::f32::consts::TAU;

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(121, 85, 72),   // Brown
];

/// Slice for records outside the top languages.
pub const OTHER_COLOR: Color32 = Color32::from_rgb(96, 125, 139);

const CHART_HEIGHT: f32 = 280.0;
const HEATMAP_CELL: f32 = 72.0;
const PIE_RADIUS: f32 = 120.0;

/// Draws dashboard charts and tables.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn get_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Bar chart of one metric, one bar per repository.
    pub fn draw_metric_bars(ui: &mut egui::Ui, id: &str, records: &[RepoRecord], metric: Metric) {
        let labels: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        let bars: Vec<Bar> = records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Bar::new(i as f64, r.metric(metric).unwrap_or(0) as f64)
                    .name(&r.repository)
                    .width(0.7)
                    .fill(Self::get_color(i))
            })
            .collect();

        Self::bar_plot(ui, id, labels, metric.label(), BarChart::new(bars));
    }

    /// Mean stars per language.
    pub fn draw_group_means(ui: &mut egui::Ui, means: &[GroupMeans]) {
        let labels: Vec<String> = means.iter().map(|g| g.language.clone()).collect();
        let bars: Vec<Bar> = means
            .iter()
            .enumerate()
            .map(|(i, g)| {
                Bar::new(i as f64, g.means.stars.unwrap_or(0.0))
                    .name(format!("{} ({} repos)", g.language, g.count))
                    .width(0.7)
                    .fill(Self::get_color(i))
            })
            .collect();

        Self::bar_plot(ui, "language_means", labels, "Mean Stars", BarChart::new(bars));
    }

    fn bar_plot(ui: &mut egui::Ui, id: &str, labels: Vec<String>, y_label: &str, chart: BarChart) {
        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .y_axis_label(y_label)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| plot_ui.bar_chart(chart));
    }

    /// Stars against forks.
    pub fn draw_scatter(ui: &mut egui::Ui, points: &[ScatterPoint]) {
        let coords: Vec<[f64; 2]> = points
            .iter()
            .map(|p| [p.stars as f64, p.forks as f64])
            .collect();

        Plot::new("stars_vs_forks")
            .height(CHART_HEIGHT)
            .x_axis_label(Metric::Stars.label())
            .y_axis_label(Metric::Forks.label())
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(coords)
                        .radius(3.0)
                        .color(PALETTE[0].gamma_multiply(0.7))
                        .name("Repositories"),
                );
            });
    }

    /// Correlation heatmap drawn as a colored grid.
    pub fn draw_heatmap(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
        egui::Grid::new("correlation_heatmap")
            .spacing([2.0, 2.0])
            .show(ui, |ui| {
                ui.label("");
                for metric in &matrix.metrics {
                    ui.label(RichText::new(metric.label()).size(11.0).strong());
                }
                ui.end_row();

                for (row, values) in matrix.metrics.iter().zip(&matrix.values) {
                    ui.label(RichText::new(row.label()).size(11.0).strong());
                    for value in values {
                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(HEATMAP_CELL, HEATMAP_CELL * 0.5),
                            Sense::hover(),
                        );
                        let (fill, text) = match value {
                            Some(v) => (Self::diverging_color(*v), format!("{v:.2}")),
                            None => (Color32::DARK_GRAY, "-".to_string()),
                        };
                        ui.painter().rect_filled(rect, 2.0, fill);
                        ui.painter().text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            text,
                            FontId::proportional(12.0),
                            Color32::BLACK,
                        );
                        if value.is_none() {
                            response.on_hover_text("Not enough data");
                        }
                    }
                    ui.end_row();
                }
            });
    }

    /// Blue for -1, white for 0, red for +1.
    fn diverging_color(value: f64) -> Color32 {
        let t = value.clamp(-1.0, 1.0) as f32;
        let lerp = |from: u8, to: u8, amount: f32| {
            (from as f32 + (to as f32 - from as f32) * amount).round() as u8
        };
        let (target, amount) = if t >= 0.0 {
            ((231, 76, 60), t)
        } else {
            ((52, 152, 219), -t)
        };
        Color32::from_rgb(
            lerp(255, target.0, amount),
            lerp(255, target.1, amount),
            lerp(255, target.2, amount),
        )
    }

    /// Pie of language shares; the remainder is drawn as "Other".
    pub fn draw_pie(ui: &mut egui::Ui, shares: &[CategoryShare]) {
        let size = egui::vec2(PIE_RADIUS * 2.0, PIE_RADIUS * 2.0);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let center = rect.center();
        let painter = ui.painter();

        let mut start = -TAU / 4.0;
        let covered: f64 = shares.iter().map(|s| s.percentage).sum();
        let other = (100.0 - covered).max(0.0);
        let slices = shares
            .iter()
            .enumerate()
            .map(|(i, s)| (s.percentage, Self::get_color(i)))
            .chain(std::iter::once((other, OTHER_COLOR)));

        for (percentage, color) in slices {
            let sweep = (percentage / 100.0) as f32 * TAU;
            if sweep <= 0.0 {
                continue;
            }
            // Split into thin triangles so every shape stays convex.
            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            for k in 0..steps {
                let a0 = start + sweep * k as f32 / steps as f32;
                let a1 = start + sweep * (k + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        center + PIE_RADIUS * egui::vec2(a0.cos(), a0.sin()),
                        center + PIE_RADIUS * egui::vec2(a1.cos(), a1.sin()),
                    ],
                    color,
                    Stroke::NONE,
                ));
            }
            start += sweep;
        }
    }

    /// Legend and numbers for the pie.
    pub fn draw_share_table(ui: &mut egui::Ui, shares: &[CategoryShare]) {
        egui::Grid::new("language_shares")
            .striped(true)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("").size(11.0));
                ui.label(RichText::new("Language").strong().size(11.0));
                ui.label(RichText::new("Repos").strong().size(11.0));
                ui.label(RichText::new("Share").strong().size(11.0));
                ui.end_row();

                for (i, share) in shares.iter().enumerate() {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, Self::get_color(i));
                    ui.label(RichText::new(&share.language).size(11.0));
                    ui.label(RichText::new(share.count.to_string()).size(11.0));
                    ui.label(RichText::new(format!("{:.1}%", share.percentage)).size(11.0));
                    ui.end_row();
                }
            });
    }

    /// Totals and means per metric.
    pub fn draw_summary_table(ui: &mut egui::Ui, summary: &[MetricSummary]) {
        egui::Grid::new("metric_summary")
            .striped(true)
            .min_col_width(70.0)
            .show(ui, |ui| {
                for header in ["Metric", "Present", "Total", "Mean"] {
                    ui.label(RichText::new(header).strong().size(11.0));
                }
                ui.end_row();

                for s in summary {
                    ui.label(RichText::new(s.metric.label()).size(11.0));
                    ui.label(RichText::new(s.present.to_string()).size(11.0));
                    ui.label(RichText::new(s.total.to_string()).size(11.0));
                    ui.label(RichText::new(Self::format_mean(s.mean)).size(11.0));
                    ui.end_row();
                }
            });
    }

    /// Raw records with every column.
    pub fn draw_records_table(ui: &mut egui::Ui, id: &str, records: &[RepoRecord]) {
        egui::Grid::new(ui.make_persistent_id(id))
            .striped(true)
            .min_col_width(60.0)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Repository").strong().size(11.0));
                ui.label(RichText::new("Language").strong().size(11.0));
                for metric in Metric::ALL {
                    ui.label(RichText::new(metric.label()).strong().size(11.0));
                }
                ui.end_row();

                for record in records {
                    ui.label(RichText::new(&record.repository).size(11.0))
                        .on_hover_text(record.name.as_str());
                    ui.label(
                        RichText::new(record.language.as_deref().unwrap_or("-")).size(11.0),
                    );
                    for metric in Metric::ALL {
                        let text = record
                            .metric(metric)
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "-".to_string());
                        ui.label(RichText::new(text).size(11.0));
                    }
                    ui.end_row();
                }
            });
    }

    fn format_mean(mean: Option<f64>) -> String {
        mean.map(|m| format!("{m:.2}"))
            .unwrap_or_else(|| "-".to_string())
    }
}
