use std::cell::OnceCell;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rand::Rng;

use crate::classifier::Classifier;
use crate::config::AppConfig;
use crate::data::labels::LabelEncoder;
use crate::data::loader;
use crate::data::model::{Dataset, Features, N_FEATURES, SampledPrediction};
use crate::data::sample::sample_indices;

// ---------------------------------------------------------------------------
// Lazily loaded, read-only resources
// ---------------------------------------------------------------------------

/// Dataset, label encoder and model, each built on first use and then only
/// read. Construction order is dataset → labels → model: asking for the
/// model first builds the other two.
///
/// A failed load leaves its cell empty so the next interaction retries.
/// Opening a different file replaces the whole `Resources`.
#[derive(Debug)]
pub struct Resources {
    data_path: PathBuf,
    model_path: PathBuf,
    dataset: OnceCell<Dataset>,
    labels: OnceCell<LabelEncoder>,
    model: OnceCell<Classifier>,
}

impl Resources {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            data_path: config.data_path.clone(),
            model_path: config.model_path.clone(),
            dataset: OnceCell::new(),
            labels: OnceCell::new(),
            model: OnceCell::new(),
        }
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        if let Some(ds) = self.dataset.get() {
            return Ok(ds);
        }
        let ds = loader::load_file(&self.data_path)
            .with_context(|| format!("loading dataset {}", self.data_path.display()))?;
        log::info!(
            "Loaded {} records with labels {:?}",
            ds.len(),
            ds.label_counts.keys().collect::<Vec<_>>()
        );
        Ok(self.dataset.get_or_init(|| ds))
    }

    pub fn labels(&self) -> Result<&LabelEncoder> {
        if let Some(le) = self.labels.get() {
            return Ok(le);
        }
        let le = LabelEncoder::fit(self.dataset()?.labels());
        log::debug!("Label mapping: {:?}", le.classes());
        Ok(self.labels.get_or_init(|| le))
    }

    pub fn model(&self) -> Result<&Classifier> {
        if let Some(model) = self.model.get() {
            return Ok(model);
        }
        self.labels()?;
        let model = Classifier::load(&self.model_path)?;
        if model.n_features() != N_FEATURES {
            bail!(
                "model expects {} features, the dataset has {N_FEATURES}",
                model.n_features()
            );
        }
        log::info!("Loaded model {}", self.model_path.display());
        Ok(self.model.get_or_init(|| model))
    }

    /// Dataset if it has already been loaded, without triggering a load.
    pub fn loaded_dataset(&self) -> Option<&Dataset> {
        self.dataset.get()
    }

    /// Predict the localization site for user-entered features.
    pub fn predict_label(&self, features: &Features) -> Result<String> {
        let model = self.model()?;
        let code = model.predict(features)?;
        Ok(self.labels()?.decode(code)?.to_string())
    }

    /// Draw `n` random rows and append each one's predicted site.
    pub fn sample_and_predict<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<SampledPrediction>> {
        let model = self.model()?;
        let labels = self.labels()?;
        let dataset = self.dataset()?;

        let records: Vec<_> = sample_indices(dataset, n, rng)
            .into_iter()
            .map(|i| dataset.records[i].clone())
            .collect();
        let features: Vec<Features> = records.iter().map(|r| r.features).collect();
        let codes = model.predict_batch(&features)?;

        records
            .into_iter()
            .zip(codes)
            .map(|(record, code)| -> Result<SampledPrediction> {
                Ok(SampledPrediction {
                    record,
                    predicted: labels.decode(code)?.to_string(),
                })
            })
            .collect()
    }
}
