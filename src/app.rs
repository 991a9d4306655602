use eframe::egui::{self, Ui};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{panels, predict};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct YeastLocalizerApp {
    pub state: AppState,
}

impl YeastLocalizerApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for YeastLocalizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: mode + dataset ----
        egui::SidePanel::left("mode_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: prediction + appendix ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading(egui::RichText::new("Protein Localization Site Predictor").size(28.0));
                    ui.label(
                        "Predict the cellular localization site of yeast proteins using a trained model.",
                    );
                    ui.add_space(8.0);

                    predict::mode_section(ui, &mut self.state);

                    ui.add_space(12.0);
                    ui.separator();
                    ui.heading("Appendix: Full Analysis Report");
                    self.state.report_view().show(ui);
                });
        });
    }
}
