//! Estimate export
//!
//! Every exporter reads a [`FinalizedEstimate`] as-is; totals are never
//! recomputed on the way out.

mod csv_report;
mod excel;

pub use csv_report::export_to_csv;
pub use excel::export_to_excel;

use arbor_domain::service::render_text_estimate;
use arbor_types::{FinalizedEstimate, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// File format for exported estimates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain text message
    #[default]
    Text,
    Json,
    Csv,
    /// Excel workbook
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// `estimate-Jane_Smith.txt`: customer name with whitespace replaced by `_`
pub fn default_file_name(estimate: &FinalizedEstimate, format: ExportFormat) -> String {
    let customer: String = estimate
        .customer_info
        .name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("estimate-{}.{}", customer, format.extension())
}

/// Default export path inside `dir`
pub fn default_export_path(
    dir: &Path,
    estimate: &FinalizedEstimate,
    format: ExportFormat,
) -> PathBuf {
    dir.join(default_file_name(estimate, format))
}

/// Write the estimate to `output_path` in the given format
pub fn export_estimate(
    estimate: &FinalizedEstimate,
    format: ExportFormat,
    output_path: &Path,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Text => std::fs::write(output_path, render_text_estimate(estimate))?,
        ExportFormat::Json => {
            let writer = BufWriter::new(File::create(output_path)?);
            serde_json::to_writer_pretty(writer, estimate)?;
        }
        ExportFormat::Csv => export_to_csv(estimate, output_path)?,
        ExportFormat::Xlsx => export_to_excel(estimate, output_path)?,
    }

    info!(path = %output_path.display(), format = %format, "estimate exported");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_estimate;
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_file_name() {
        let estimate = sample_estimate();
        assert_eq!(
            default_file_name(&estimate, ExportFormat::Text),
            "estimate-Jane__Smith.txt"
        );
        assert_eq!(
            default_file_name(&estimate, ExportFormat::Xlsx),
            "estimate-Jane__Smith.xlsx"
        );
    }

    #[test]
    fn test_export_text() {
        let dir = tempdir().unwrap();
        let estimate = sample_estimate();
        let path = default_export_path(dir.path(), &estimate, ExportFormat::Text);
        export_estimate(&estimate, ExportFormat::Text, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, render_text_estimate(&estimate));
    }

    #[test]
    fn test_export_json_round_trips() {
        let dir = tempdir().unwrap();
        let estimate = sample_estimate();
        let path = dir.path().join("out").join("estimate.json");
        export_estimate(&estimate, ExportFormat::Json, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: FinalizedEstimate = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, estimate);
        assert!(content.contains("\"minimumChargeApplied\": false"));
    }

    #[test]
    fn test_export_xlsx_writes_file() {
        let dir = tempdir().unwrap();
        let estimate = sample_estimate();
        let path = dir.path().join("estimate.xlsx");
        export_estimate(&estimate, ExportFormat::Xlsx, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
