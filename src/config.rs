use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Resource locations
// ---------------------------------------------------------------------------

/// Where the dataset, model and report are read from.
///
/// Defaults are relative to the working directory; each one can be
/// overridden from the environment and later replaced from the File menu.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub report_path: PathBuf,
    /// Base directory for relative image paths inside the report.
    pub image_dir: PathBuf,
}

pub const ENV_DATA: &str = "YEAST_DATA";
pub const ENV_MODEL: &str = "YEAST_MODEL";
pub const ENV_REPORT: &str = "YEAST_REPORT";
pub const ENV_IMAGES: &str = "YEAST_IMAGES";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("yeast_data.txt"),
            model_path: PathBuf::from("best_model.json"),
            report_path: PathBuf::from("model_comparison.md"),
            image_dir: PathBuf::new(),
        }
    }
}

impl AppConfig {
    /// Defaults with any `YEAST_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(PathBuf::from))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        let mut cfg = Self::default();
        for (key, slot) in [
            (ENV_DATA, &mut cfg.data_path),
            (ENV_MODEL, &mut cfg.model_path),
            (ENV_REPORT, &mut cfg.report_path),
            (ENV_IMAGES, &mut cfg.image_dir),
        ] {
            if let Some(value) = lookup(key) {
                log::debug!("{key} = {}", value.display());
                *slot = value;
            }
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_what_is_set() {
        let cfg = AppConfig::from_lookup(|key| match key {
            ENV_MODEL => Some(PathBuf::from("/models/rf.json")),
            ENV_IMAGES => Some(PathBuf::from("figures")),
            _ => None,
        });
        assert_eq!(cfg.model_path, PathBuf::from("/models/rf.json"));
        assert_eq!(cfg.image_dir, PathBuf::from("figures"));
        assert_eq!(cfg.data_path, AppConfig::default().data_path);
        assert_eq!(cfg.report_path, AppConfig::default().report_path);
    }
}
