use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Dataset, FEATURE_NAMES, Features, ID_COLUMN, LABEL_COLUMN, N_FEATURES, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the yeast dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming `Sequence_Name`, the eight features and
///   `Localization_Site`
/// * anything else – the UCI whitespace-separated layout, no header
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        _ => load_whitespace(path)?,
    };

    if dataset.is_empty() {
        bail!("{} contains no records", path.display());
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Whitespace loader
// ---------------------------------------------------------------------------

/// Row layout: `<id> <mcg> <gvh> <alm> <mit> <erl> <pox> <vac> <nuc> <label>`.
/// Any run of spaces or tabs separates fields; blank lines are skipped.
fn load_whitespace(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_whitespace(&text)
}

pub fn parse_whitespace(text: &str) -> Result<Dataset> {
    let mut records = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != N_FEATURES + 2 {
            bail!(
                "Line {line_no}: expected {} fields, found {}",
                N_FEATURES + 2,
                fields.len()
            );
        }

        let mut features: Features = [0.0; N_FEATURES];
        for (j, slot) in features.iter_mut().enumerate() {
            *slot = parse_feature(fields[j + 1], line_no, FEATURE_NAMES[j])?;
        }

        records.push(Record {
            id: fields[0].to_string(),
            features,
            label: fields[N_FEATURES + 1].to_string(),
        });
    }

    Ok(Dataset::from_records(records))
}

fn parse_feature(tok: &str, line_no: usize, col: &str) -> Result<f64> {
    tok.parse::<f64>()
        .with_context(|| format!("Line {line_no}, {col}: '{tok}' is not a number"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, looked up by name so column
/// order does not matter. Extra columns are ignored.
fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };

    let id_idx = column(ID_COLUMN)?;
    let label_idx = column(LABEL_COLUMN)?;
    let feature_idx: Vec<usize> = FEATURE_NAMES
        .iter()
        .map(|&name| column(name))
        .collect::<Result<_>>()?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        // Header is line 1.
        let line_no = row_no + 2;
        let record = result.with_context(|| format!("CSV line {line_no}"))?;

        let mut features: Features = [0.0; N_FEATURES];
        for (j, slot) in features.iter_mut().enumerate() {
            let tok = record.get(feature_idx[j]).unwrap_or("").trim();
            *slot = parse_feature(tok, line_no, FEATURE_NAMES[j])?;
        }

        records.push(Record {
            id: record.get(id_idx).unwrap_or("").trim().to_string(),
            features,
            label: record.get(label_idx).unwrap_or("").trim().to_string(),
        });
    }

    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
ADT1_YEAST  0.58  0.61  0.47  0.13  0.50  0.00  0.48  0.22  MIT
ADT2_YEAST  0.43  0.67  0.48  0.27  0.50  0.00  0.53  0.22  MIT

AATM_YEAST\t0.37 0.40\t0.49  0.15  0.50  0.00  0.48  0.22  NUC
";

    #[test]
    fn parses_irregular_whitespace() {
        let ds = parse_whitespace(SAMPLE).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].id, "ADT1_YEAST");
        assert_eq!(ds.records[0].features[0], 0.58);
        assert_eq!(ds.records[2].features[1], 0.40);
        assert_eq!(ds.records[2].label, "NUC");
        assert_eq!(ds.label_counts["MIT"], 2);
    }

    #[test]
    fn short_row_reports_line_number() {
        let text = "A 0.1 0.2 0.3 0.4 0.5 0.0 0.5 0.2 CYT\nB 0.1 0.2 CYT\n";
        let err = parse_whitespace(text).unwrap_err();
        assert!(err.to_string().contains("Line 2"), "{err}");
    }

    #[test]
    fn non_numeric_feature_is_rejected() {
        let text = "A 0.1 x 0.3 0.4 0.5 0.0 0.5 0.2 CYT\n";
        let err = parse_whitespace(text).unwrap_err();
        assert!(format!("{err:#}").contains("gvh"), "{err:#}");
    }

    #[test]
    fn reads_csv_by_column_name() {
        let data = "\
Localization_Site,Sequence_Name,mcg,gvh,alm,mit,erl,pox,vac,nuc
CYT,ABC1,0.1,0.2,0.3,0.4,0.5,0.0,0.5,0.22
";
        let ds = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].id, "ABC1");
        assert_eq!(ds.records[0].label, "CYT");
        assert_eq!(ds.records[0].features[7], 0.22);
    }

    #[test]
    fn load_file_dispatches_and_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();

        let txt = dir.path().join("yeast.data");
        std::fs::File::create(&txt)
            .unwrap()
            .write_all(SAMPLE.as_bytes())
            .unwrap();
        assert_eq!(load_file(&txt).unwrap().len(), 3);

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "\n\n").unwrap();
        assert!(load_file(&empty).is_err());

        assert!(load_file(&dir.path().join("missing.txt")).is_err());
    }
}
