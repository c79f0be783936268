//! GitHub Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{DashboardModel, Selection};
use crate::config::Config;
use crate::data::{DataProcessor, Dataset, DatasetCache};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::Arc;

/// Main application window.
pub struct DashboardApp {
    cache: DatasetCache,
    dataset: Option<Arc<Dataset>>,
    table_rows: usize,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &Config, selection: Selection) -> Self {
        let mut control_panel =
            ControlPanel::new(config.data.path.clone(), selection.top_n);
        control_panel.settings.language = selection.language.to_string();

        let mut app = Self {
            cache: DatasetCache::new(),
            dataset: None,
            table_rows: selection.table_rows,
            control_panel,
            chart_viewer: ChartViewer::new(),
        };
        app.load_dataset();
        app
    }

    /// Fetch the dataset for the configured path through the cache.
    fn load_dataset(&mut self) {
        let path = self.control_panel.settings.csv_path.clone();
        match self.cache.get_or_load(&path) {
            Ok(dataset) => {
                self.control_panel
                    .update_languages(DataProcessor::language_options(dataset.records()));
                self.control_panel
                    .set_status(format!("Loaded {} repositories", dataset.len()));
                self.dataset = Some(dataset);
                self.rebuild_model();
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to load dataset");
                self.dataset = None;
                self.control_panel.set_status(format!("Error: {e}"));
                self.chart_viewer.set_error(e.to_string());
            }
        }
    }

    fn current_selection(&self) -> Selection {
        let settings = &self.control_panel.settings;
        Selection {
            language: settings
                .language
                .parse()
                .unwrap_or_default(),
            top_n: settings.top_n,
            table_rows: self.table_rows,
        }
    }

    fn rebuild_model(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let model = DashboardModel::build(dataset, &self.current_selection());
        self.chart_viewer.set_model(model);
    }

    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.settings.csv_path = path;
            self.load_dataset();
        }
    }

    fn handle_reload(&mut self) {
        self.cache.invalidate();
        self.load_dataset();
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::SelectionChanged => self.rebuild_model(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        let page = self.control_panel.settings.page;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, page);
        });
    }
}
