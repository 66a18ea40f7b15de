//! CSV export

use arbor_domain::service::{format_amount, EstimateBreakdown};
use arbor_types::{Error, FinalizedEstimate, Result};
use std::path::Path;

/// One row per item, then the sub-total, adjustment and final total rows
pub fn export_to_csv(estimate: &FinalizedEstimate, output_path: &Path) -> Result<()> {
    let breakdown = EstimateBreakdown::from_estimate(estimate);
    let mut writer =
        csv::Writer::from_path(output_path).map_err(|e| Error::Export(e.to_string()))?;

    let mut rows: Vec<[String; 3]> = vec![[
        "Item".to_string(),
        "Detail".to_string(),
        "Amount".to_string(),
    ]];
    for row in &breakdown.rows {
        rows.push([row.title().to_string(), row.detail(), format_amount(row.cost())]);
    }
    rows.push(["Sub-total".to_string(), String::new(), format_amount(breakdown.sub_total)]);
    if let Some(adjustment) = breakdown.adjustment {
        rows.push([
            "Minimum Charge Adjustment".to_string(),
            String::new(),
            format_amount(adjustment),
        ]);
    }
    rows.push([
        "Final Estimate".to_string(),
        String::new(),
        format_amount(breakdown.final_total),
    ]);

    for row in &rows {
        writer
            .write_record(row)
            .map_err(|e| Error::Export(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::{minimum_charge_estimate, sample_estimate};
    use tempfile::tempdir;

    #[test]
    fn test_csv_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("estimate.csv");
        export_to_csv(&sample_estimate(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "Item,Detail,Amount");
        assert_eq!(lines[1], "Tree Removal,1 x 15.0 ft height,450.00");
        assert_eq!(lines[2], "Tree Trimming,2 x 8.0 ft height,240.00");
        assert_eq!(lines[3], "Wood Haul Away,1 truckload(s),150.00");
        assert_eq!(lines[4], "Sub-total,,840.00");
        assert_eq!(lines[5], "Final Estimate,,840.00");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_csv_includes_adjustment_when_applied() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("estimate.csv");
        export_to_csv(&minimum_charge_estimate(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Minimum Charge Adjustment,,70.00"));
        assert!(content.contains("Final Estimate,,150.00"));
    }

    #[test]
    fn test_csv_rounds_half_cents_like_text() {
        let mut estimate = minimum_charge_estimate();
        estimate.line_items[0].cost = 6.125;
        let dir = tempdir().unwrap();
        let path = dir.path().join("estimate.csv");
        export_to_csv(&estimate, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Stump Grinding,1 x 10.0 inch diameter,6.13"));
    }
}
