//! Chart Viewer Widget
//! Central scrollable panel drawing the current dashboard model.

use crate::charts::{ChartPlotter, DashboardModel, LanguageDetail};
use crate::data::Metric;
use crate::gui::control_panel::Page;
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 20.0;

/// Holds the latest model, or the load error that replaced it.
#[derive(Default)]
pub struct ChartViewer {
    pub model: Option<DashboardModel>,
    pub error: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_model(&mut self, model: DashboardModel) {
        self.model = Some(model);
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.model = None;
        self.error = Some(error);
    }

    pub fn show(&self, ui: &mut egui::Ui, page: Page) {
        if let Some(error) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(format!("Could not load dataset: {error}"))
                        .size(16.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            });
            return;
        }

        let Some(model) = &self.model else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match page {
                Page::Home => Self::show_home(ui, model),
                Page::Analysis => Self::show_analysis(ui, model),
            });
    }

    fn show_home(ui: &mut egui::Ui, model: &DashboardModel) {
        ui.heading("Welcome to the GitHub Analytics Dashboard!");
        ui.separator();
        ui.label("Select a page from the sidebar to begin exploring!");
        ui.add_space(10.0);
        ui.label(format!(
            "{} repositories across {} languages loaded.",
            model.total_records,
            model.language_options.len().saturating_sub(1)
        ));
    }

    fn show_analysis(ui: &mut egui::Ui, model: &DashboardModel) {
        let n = model.selection.top_n;
        ui.heading(format!(
            "GitHub Dataset Analysis: {} ({} of {} repositories)",
            model.selection.language, model.filtered_records, model.total_records
        ));
        ui.add_space(SECTION_SPACING);

        Self::section(ui, &format!("Top {n} Repositories by Stars"), |ui| {
            ChartPlotter::draw_metric_bars(ui, "top_stars", &model.top_by_stars, Metric::Stars);
        });
        Self::section(ui, &format!("Top {n} Repositories by Forks"), |ui| {
            ChartPlotter::draw_metric_bars(ui, "top_forks", &model.top_by_forks, Metric::Forks);
        });
        Self::section(ui, "Stars vs Forks", |ui| {
            ChartPlotter::draw_scatter(ui, &model.scatter);
        });
        Self::section(ui, "Metric Correlation", |ui| {
            ChartPlotter::draw_heatmap(ui, &model.correlation);
        });
        Self::section(ui, &format!("Top {n} Languages by Mean Stars"), |ui| {
            ChartPlotter::draw_group_means(ui, &model.language_means);
        });
        Self::section(ui, "Language Distribution (all repositories)", |ui| {
            if model.language_distribution.is_empty() {
                ui.label("No language data");
                return;
            }
            ui.horizontal(|ui| {
                ChartPlotter::draw_pie(ui, &model.language_distribution);
                ui.add_space(SECTION_SPACING);
                ChartPlotter::draw_share_table(ui, &model.language_distribution);
            });
        });
        Self::section(ui, "Language Detail", |ui| match &model.language_detail {
            Ok(detail) => Self::show_language_detail(ui, detail),
            Err(warning) => {
                ui.label(
                    RichText::new(warning.to_string())
                        .italics()
                        .color(Color32::from_rgb(243, 156, 18)),
                );
            }
        });
        Self::section(ui, "Dataset", |ui| {
            ScrollArea::horizontal().show(ui, |ui| {
                ChartPlotter::draw_records_table(ui, "records_table", &model.table);
            });
            if model.table.len() < model.filtered_records {
                ui.label(
                    RichText::new(format!(
                        "Showing {} of {} rows",
                        model.table.len(),
                        model.filtered_records
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
            }
        });
    }

    fn show_language_detail(ui: &mut egui::Ui, detail: &LanguageDetail) {
        ui.label(format!("{} repositories written in {}", detail.record_count, detail.language));
        ui.add_space(8.0);
        ChartPlotter::draw_summary_table(ui, &detail.summary);
        ui.add_space(8.0);
        ui.label(RichText::new("Most starred").strong());
        ChartPlotter::draw_metric_bars(ui, "detail_stars", &detail.top_by_stars, Metric::Stars);
        ui.label(RichText::new("Most contributors").strong());
        ChartPlotter::draw_metric_bars(
            ui,
            "detail_contributors",
            &detail.top_by_contributors,
            Metric::Contributors,
        );
    }

    fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(16.0).strong());
                ui.add_space(8.0);
                add_contents(ui);
            });
        ui.add_space(SECTION_SPACING);
    }
}
