use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::FEATURE_NAMES;
use crate::state::{AppState, Mode};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Left side panel – mode selector and dataset summary
// ---------------------------------------------------------------------------

/// Render the left side panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inference");
    ui.separator();

    ui.strong("Choose inference mode:");
    egui::ComboBox::from_id_salt("mode")
        .selected_text(state.mode.label())
        .show_ui(ui, |ui: &mut Ui| {
            for mode in Mode::ALL {
                ui.selectable_value(&mut state.mode, mode, mode.label());
            }
        });
    ui.separator();

    let dataset = match state.resources.loaded_dataset() {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.strong("Dataset");
    ui.label(format!(
        "{} proteins, {} localization sites",
        dataset.len(),
        dataset.label_counts.len()
    ));
    ui.label(
        RichText::new(format!("Features: {}", FEATURE_NAMES.join(", ")))
            .small()
            .weak(),
    );
    ui.add_space(6.0);

    ui.strong("Class distribution");
    plot::class_distribution(ui, dataset, &state.colors);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_dataset_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open model…").clicked() {
                open_model_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open report…").clicked() {
                open_report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = state.resources.loaded_dataset() {
            ui.label(format!(
                "{} records from {}",
                ds.len(),
                state.config.data_path.display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_dataset_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open yeast dataset")
        .add_filter("Supported files", &["txt", "data", "csv"])
        .add_filter("Whitespace-separated", &["txt", "data"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.set_data_path(path);
    }
}

pub fn open_model_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open model artifact")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.set_model_path(path);
        // Surface a bad artifact right away instead of on the next click.
        if let Err(e) = state.resources.model() {
            log::error!("Failed to load model: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn open_report_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open analysis report")
        .add_filter("Markdown", &["md", "markdown"])
        .pick_file();

    if let Some(path) = file {
        state.set_report_path(path);
    }
}
