use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("unknown label '{0}'")]
    UnknownLabel(String),
    #[error("unknown class code {0}")]
    UnknownCode(usize),
}

// ---------------------------------------------------------------------------
// LabelEncoder – localization site ↔ class code
// ---------------------------------------------------------------------------

/// Bijection between label strings and `0..len()`.
///
/// Codes follow the sorted order of the distinct labels, so the same label
/// column always yields the same mapping regardless of row order.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Build the mapping from every label in the column.
    pub fn fit<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<String> = labels
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        LabelEncoder { classes, index }
    }

    pub fn encode(&self, label: &str) -> Result<usize, LabelError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| LabelError::UnknownLabel(label.to_string()))
    }

    pub fn decode(&self, code: usize) -> Result<&str, LabelError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(LabelError::UnknownCode(code))
    }

    /// Distinct labels, indexed by code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_labels_round_trip() {
        let le = LabelEncoder::fit(["NUC", "CYT", "MIT", "CYT", "NUC"]);
        assert_eq!(le.len(), 3);
        for label in ["CYT", "NUC", "MIT"] {
            let code = le.encode(label).unwrap();
            assert_eq!(le.decode(code).unwrap(), label);
        }
    }

    #[test]
    fn codes_follow_sorted_order() {
        let le = LabelEncoder::fit(["NUC", "MIT", "CYT"]);
        assert_eq!(le.classes(), ["CYT", "MIT", "NUC"]);
        assert_eq!(le.encode("CYT"), Ok(0));
        assert_eq!(le.encode("NUC"), Ok(2));
    }

    #[test]
    fn unknown_inputs_are_errors() {
        let le = LabelEncoder::fit(["CYT"]);
        assert_eq!(le.encode("ERL"), Err(LabelError::UnknownLabel("ERL".into())));
        assert_eq!(le.decode(5), Err(LabelError::UnknownCode(5)));
    }
}
