//! Control Panel Widget
//! Left sidebar with page navigation, dataset source and the language filter.

use crate::config::MAX_TOP_N;
use crate::data::ALL_LANGUAGES;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Analysis,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Analysis => "GitHub Dataset Analysis",
        }
    }
}

/// User settings driving the analysis.
#[derive(Debug, Clone)]
pub struct UserSettings {
    pub csv_path: PathBuf,
    pub page: Page,
    pub language: String,
    pub top_n: usize,
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub languages: Vec<String>,
    pub status: String,
}

impl ControlPanel {
    pub fn new(csv_path: PathBuf, top_n: usize) -> Self {
        Self {
            settings: UserSettings {
                csv_path,
                page: Page::default(),
                language: ALL_LANGUAGES.to_string(),
                top_n,
            },
            languages: vec![ALL_LANGUAGES.to_string()],
            status: "Ready".to_string(),
        }
    }

    /// Replace selector values; falls back to "All" if the current one vanished.
    pub fn update_languages(&mut self, languages: Vec<String>) {
        if !languages.contains(&self.settings.language) {
            self.settings.language = ALL_LANGUAGES.to_string();
        }
        self.languages = languages;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("GitHub Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(255, 165, 0)),
            );
        });
        ui.add_space(10.0);
        ui.separator();

        // ===== Page Section =====
        ui.label(RichText::new("Page").size(14.0).strong());
        ComboBox::from_id_salt("page")
            .width(220.0)
            .selected_text(self.settings.page.title())
            .show_ui(ui, |ui| {
                for page in [Page::Home, Page::Analysis] {
                    ui.selectable_value(&mut self.settings.page, page, page.title());
                }
            });

        ui.add_space(10.0);
        ui.separator();

        // ===== Data Source Section =====
        ui.label(RichText::new("Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let file_name = self
                    .settings
                    .csv_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| self.settings.csv_path.display().to_string());
                ui.label(RichText::new(file_name).size(12.0))
                    .on_hover_text(self.settings.csv_path.display().to_string());

                ui.horizontal(|ui| {
                    if ui.button("Open CSV").clicked() {
                        action = ControlPanelAction::BrowseCsv;
                    }
                    if ui.button("Reload").clicked() {
                        action = ControlPanelAction::Reload;
                    }
                });
            });

        ui.add_space(10.0);
        ui.separator();

        // ===== Filter Section =====
        ui.label(RichText::new("Filters").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Language:");
            ComboBox::from_id_salt("language")
                .width(160.0)
                .selected_text(&self.settings.language)
                .show_ui(ui, |ui| {
                    for language in &self.languages {
                        if ui
                            .selectable_label(self.settings.language == *language, language)
                            .clicked()
                            && self.settings.language != *language
                        {
                            self.settings.language = language.clone();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label("Top N:");
            if ui
                .add(egui::Slider::new(&mut self.settings.top_n, 1..=MAX_TOP_N))
                .changed()
            {
                action = ControlPanelAction::SelectionChanged;
            }
        });

        ui.add_space(10.0);
        ui.separator();

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Reload,
    SelectionChanged,
}
