use std::path::PathBuf;

use crate::color::LabelColors;
use crate::config::AppConfig;
use crate::data::model::{Features, N_FEATURES, SampledPrediction};
use crate::report::view::ReportView;
use crate::resources::Resources;

// ---------------------------------------------------------------------------
// Inference mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    CustomInput,
    RandomSample,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::CustomInput, Mode::RandomSample];

    pub fn label(self) -> &'static str {
        match self {
            Mode::CustomInput => "Custom Input",
            Mode::RandomSample => "Random Sample",
        }
    }
}

pub const MIN_SAMPLES: usize = 1;
pub const MAX_SAMPLES: usize = 10;
pub const DEFAULT_SAMPLES: usize = 3;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Dataset, labels and model, loaded on first use.
    pub resources: Resources,

    /// Per-label colours (empty until the dataset is loaded).
    pub colors: LabelColors,

    pub mode: Mode,

    /// Manual feature entry, in `FEATURE_NAMES` order.
    pub inputs: Features,

    /// Last custom-input prediction.
    pub prediction: Option<String>,

    /// Slider value for random sampling.
    pub sample_count: usize,

    /// Last sampled rows with their predictions.
    pub samples: Vec<SampledPrediction>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Appendix report; opened lazily on first draw.
    pub report: Option<ReportView>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let mut state = Self {
            resources: Resources::new(&config),
            config,
            colors: LabelColors::default(),
            mode: Mode::CustomInput,
            inputs: [0.0; N_FEATURES],
            prediction: None,
            sample_count: DEFAULT_SAMPLES,
            samples: Vec::new(),
            status_message: None,
            report: None,
        };
        state.load_dataset();
        state
    }

    /// Load the dataset eagerly so the side panel has something to show.
    pub fn load_dataset(&mut self) {
        match self.resources.dataset() {
            Ok(ds) => {
                self.colors = LabelColors::new(ds.label_counts.keys());
                self.status_message = None;
            }
            Err(e) => self.fail("Failed to load dataset", &e),
        }
    }

    /// Run the model on the manual inputs.
    pub fn predict_custom(&mut self) {
        match self.resources.predict_label(&self.inputs) {
            Ok(label) => {
                log::info!("Custom input {:?} → {label}", self.inputs);
                self.prediction = Some(label);
                self.status_message = None;
            }
            Err(e) => {
                self.prediction = None;
                self.fail("Prediction failed", &e);
            }
        }
    }

    /// Draw `sample_count` rows and predict each one.
    pub fn sample_and_predict(&mut self) {
        let n = self.sample_count.clamp(MIN_SAMPLES, MAX_SAMPLES);
        let mut rng = rand::thread_rng();
        match self.resources.sample_and_predict(n, &mut rng) {
            Ok(rows) => {
                log::info!("Predicted {} sampled rows", rows.len());
                self.samples = rows;
                self.status_message = None;
            }
            Err(e) => {
                self.samples.clear();
                self.fail("Prediction failed", &e);
            }
        }
    }

    // -- File menu actions --

    pub fn set_data_path(&mut self, path: PathBuf) {
        self.config.data_path = path;
        self.reset_resources();
        self.load_dataset();
    }

    pub fn set_model_path(&mut self, path: PathBuf) {
        self.config.model_path = path;
        self.reset_resources();
        self.load_dataset();
    }

    pub fn set_report_path(&mut self, path: PathBuf) {
        // Relative image paths in a chosen report resolve next to it.
        if let Some(dir) = path.parent() {
            self.config.image_dir = dir.to_path_buf();
        }
        self.config.report_path = path;
        self.report = None;
    }

    /// Report view for the configured path, scanning it on first use.
    pub fn report_view(&mut self) -> &mut ReportView {
        let config = &self.config;
        self.report
            .get_or_insert_with(|| ReportView::open(&config.report_path, &config.image_dir))
    }

    fn reset_resources(&mut self) {
        self.resources = Resources::new(&self.config);
        self.colors = LabelColors::default();
        self.prediction = None;
        self.samples.clear();
    }

    fn fail(&mut self, what: &str, err: &anyhow::Error) {
        log::error!("{what}: {err:#}");
        self.status_message = Some(format!("Error: {err:#}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "\
P1 0.2 0.5 0.5 0.2 0.5 0.0 0.5 0.2 CYT
P2 0.8 0.5 0.5 0.2 0.5 0.0 0.5 0.2 NUC
";

    const MODEL: &str = r#"{
        "n_features": 8,
        "estimator": { "kind": "decision_tree",
            "children_left": [1, -1, -1], "children_right": [2, -1, -1],
            "feature": [0, -2, -2], "threshold": [0.5, -2.0, -2.0],
            "value": [[1, 1], [1, 0], [0, 1]] }
    }"#;

    fn state_in(dir: &tempfile::TempDir) -> AppState {
        let data_path = dir.path().join("yeast_data.txt");
        let model_path = dir.path().join("best_model.json");
        std::fs::write(&data_path, DATA).unwrap();
        std::fs::write(&model_path, MODEL).unwrap();
        AppState::new(AppConfig {
            data_path,
            model_path,
            report_path: dir.path().join("model_comparison.md"),
            image_dir: PathBuf::new(),
        })
    }

    #[test]
    fn custom_prediction_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.inputs[0] = 0.9;
        state.predict_custom();
        assert_eq!(state.prediction.as_deref(), Some("NUC"));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn sample_count_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.sample_count = 0;
        state.sample_and_predict();
        assert_eq!(state.samples.len(), 1);
    }

    #[test]
    fn missing_model_sets_status_and_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.set_model_path(dir.path().join("gone.json"));
        state.predict_custom();
        assert!(state.prediction.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));

        // Switching back recovers.
        state.set_model_path(dir.path().join("best_model.json"));
        state.predict_custom();
        assert_eq!(state.prediction.as_deref(), Some("CYT"));
    }

    #[test]
    fn choosing_a_report_resets_image_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        let report = dir.path().join("reports").join("summary.md");
        state.set_report_path(report.clone());
        assert_eq!(state.config.image_dir, dir.path().join("reports"));
        assert_eq!(state.report_view().source(), report.as_path());
    }
}
