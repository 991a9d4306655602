use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::{self, table_header};
use crate::data::model::FEATURE_NAMES;
use crate::state::{AppState, MAX_SAMPLES, MIN_SAMPLES, Mode};

const SUCCESS_COLOR: Color32 = Color32::from_rgb(60, 170, 90);

/// Render the section for the active inference mode.
pub fn mode_section(ui: &mut Ui, state: &mut AppState) {
    match state.mode {
        Mode::CustomInput => custom_input(ui, state),
        Mode::RandomSample => random_sample(ui, state),
    }
}

// ---------------------------------------------------------------------------
// Custom input
// ---------------------------------------------------------------------------

fn custom_input(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Custom Input Prediction");
    ui.label("Enter feature values below:");
    ui.add_space(4.0);

    egui::Grid::new("feature_inputs")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            for (name, value) in FEATURE_NAMES.iter().zip(state.inputs.iter_mut()) {
                ui.label(*name);
                ui.add(egui::DragValue::new(value).speed(0.01).fixed_decimals(3));
                ui.end_row();
            }
        });

    ui.add_space(6.0);
    if ui.button("Predict").clicked() {
        state.predict_custom();
    }

    if let Some(label) = &state.prediction {
        ui.add_space(4.0);
        egui::Frame::group(ui.style())
            .fill(SUCCESS_COLOR.gamma_multiply(0.2))
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Predicted localization site:");
                    ui.label(RichText::new(label).strong().color(state.colors.color_for(label)));
                });
            });
    }
}

// ---------------------------------------------------------------------------
// Random sample
// ---------------------------------------------------------------------------

fn random_sample(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Random Sample Prediction");
    ui.add(
        egui::Slider::new(&mut state.sample_count, MIN_SAMPLES..=MAX_SAMPLES)
            .text("How many random samples?"),
    );

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Sample & Predict").clicked() {
            state.sample_and_predict();
        }
        if !state.samples.is_empty() && ui.button("Export CSV…").clicked() {
            export_dialog(state);
        }
    });

    if state.samples.is_empty() {
        return;
    }
    ui.add_space(4.0);
    samples_table(ui, state);
}

fn samples_table(ui: &mut Ui, state: &AppState) {
    let header = table_header();
    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 4.0;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(110.0))
            .columns(Column::auto().at_least(48.0), header.len() - 1)
            .header(row_height, |mut row| {
                for name in &header {
                    row.col(|ui: &mut Ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|mut body| {
                for sample in &state.samples {
                    body.row(row_height, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(&sample.record.id);
                        });
                        for v in sample.record.features {
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{v:.3}"));
                            });
                        }
                        row.col(|ui: &mut Ui| {
                            ui.label(&sample.record.label);
                        });
                        row.col(|ui: &mut Ui| {
                            let color = state.colors.color_for(&sample.predicted);
                            ui.label(RichText::new(&sample.predicted).strong().color(color));
                        });
                    });
                }
            });
    });
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export predictions")
        .add_filter("CSV", &["csv"])
        .set_file_name("predictions.csv")
        .save_file();

    if let Some(path) = file {
        match export::save_predictions(&path, &state.samples) {
            Ok(()) => {
                log::info!("Exported {} rows to {}", state.samples.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
