use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{FEATURE_NAMES, ID_COLUMN, LABEL_COLUMN, SampledPrediction};

/// Column holding the classifier's answer in the results table.
pub const PREDICTED_COLUMN: &str = "Predicted_Site";

/// Header of the sampled-predictions table, in display order.
pub fn table_header() -> Vec<&'static str> {
    let mut header = Vec::with_capacity(FEATURE_NAMES.len() + 3);
    header.push(ID_COLUMN);
    header.extend(FEATURE_NAMES);
    header.push(LABEL_COLUMN);
    header.push(PREDICTED_COLUMN);
    header
}

/// Write the sampled predictions table to a CSV file.
pub fn save_predictions(path: &Path, rows: &[SampledPrediction]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_predictions(file, rows)
}

pub fn write_predictions<W: Write>(out: W, rows: &[SampledPrediction]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(table_header()).context("writing CSV header")?;

    for row in rows {
        let mut fields = Vec::with_capacity(FEATURE_NAMES.len() + 3);
        fields.push(row.record.id.clone());
        fields.extend(row.record.features.iter().map(|v| format!("{v:.3}")));
        fields.push(row.record.label.clone());
        fields.push(row.predicted.clone());
        writer.write_record(&fields).context("writing CSV row")?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    #[test]
    fn writes_header_and_rows() {
        let rows = vec![
            SampledPrediction {
                record: Record {
                    id: "ADT1_YEAST".into(),
                    features: [0.58, 0.61, 0.47, 0.13, 0.5, 0.0, 0.48, 0.22],
                    label: "MIT".into(),
                },
                predicted: "MIT".into(),
            },
            SampledPrediction {
                record: Record {
                    id: "AATM_YEAST".into(),
                    features: [0.37, 0.4, 0.49, 0.15, 0.5, 0.0, 0.48, 0.22],
                    label: "NUC".into(),
                },
                predicted: "CYT".into(),
            },
        ];

        let mut buf = Vec::new();
        write_predictions(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Sequence_Name,mcg,gvh,alm,mit,erl,pox,vac,nuc,Localization_Site,Predicted_Site"
        );
        assert_eq!(
            lines[2],
            "AATM_YEAST,0.370,0.400,0.490,0.150,0.500,0.000,0.480,0.220,NUC,CYT"
        );
    }
}
