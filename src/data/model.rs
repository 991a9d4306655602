use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Feature schema
// ---------------------------------------------------------------------------

/// Number of numeric features per record.
pub const N_FEATURES: usize = 8;

/// Feature column names, in the order the classifier expects them.
pub const FEATURE_NAMES: [&str; N_FEATURES] =
    ["mcg", "gvh", "alm", "mit", "erl", "pox", "vac", "nuc"];

/// Identifier column name (used for CSV input and export).
pub const ID_COLUMN: &str = "Sequence_Name";

/// Label column name (used for CSV input and export).
pub const LABEL_COLUMN: &str = "Localization_Site";

/// The ordered feature vector fed to the classifier.
pub type Features = [f64; N_FEATURES];

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single protein (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Sequence name.
    pub id: String,
    /// mcg, gvh, alm, mit, erl, pox, vac, nuc.
    pub features: Features,
    /// Localization site.
    pub label: String,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed label counts.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Number of records per label, sorted by label.
    pub label_counts: BTreeMap<String, usize>,
}

impl Dataset {
    /// Build the label index from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut label_counts: BTreeMap<String, usize> = BTreeMap::new();
        for rec in &records {
            *label_counts.entry(rec.label.clone()).or_default() += 1;
        }
        Dataset {
            records,
            label_counts,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the label column.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.label.as_str())
    }
}

// ---------------------------------------------------------------------------
// SampledPrediction – a dataset row with its predicted label appended
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SampledPrediction {
    pub record: Record,
    pub predicted: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, label: &str) -> Record {
        Record {
            id: id.to_string(),
            features: [0.5; N_FEATURES],
            label: label.to_string(),
        }
    }

    #[test]
    fn counts_labels() {
        let ds = Dataset::from_records(vec![
            record("A", "CYT"),
            record("B", "NUC"),
            record("C", "CYT"),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.label_counts["CYT"], 2);
        assert_eq!(ds.label_counts["NUC"], 1);
        assert_eq!(ds.labels().collect::<Vec<_>>(), vec!["CYT", "NUC", "CYT"]);
    }
}
