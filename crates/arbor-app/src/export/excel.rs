//! Excel export functionality

use arbor_domain::service::{format_estimate_date, EstimateBreakdown};
use arbor_types::{Error, FinalizedEstimate, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Export a finalized estimate to an Excel file
pub fn export_to_excel(estimate: &FinalizedEstimate, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_estimate_sheet(sheet, estimate)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Export(e.to_string()))?;

    Ok(())
}

fn write_estimate_sheet(sheet: &mut Worksheet, estimate: &FinalizedEstimate) -> Result<()> {
    sheet
        .set_name("Estimate")
        .map_err(|e| Error::Export(e.to_string()))?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("$#,##0.00");
    let total_format = Format::new().set_bold().set_num_format("$#,##0.00");

    sheet
        .set_column_width(0, 28)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .set_column_width(1, 24)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .set_column_width(2, 14)
        .map_err(|e| Error::Export(e.to_string()))?;

    // Company and customer block
    sheet
        .write_string_with_format(0, 0, &estimate.company_info.name, &header_format)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string(1, 0, &estimate.company_info.contact_name)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string(2, 0, &estimate.company_info.phone)
        .map_err(|e| Error::Export(e.to_string()))?;

    sheet
        .write_string(4, 0, "Customer:")
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string(4, 1, &estimate.customer_info.name)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string(5, 0, "Address:")
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string(5, 1, &estimate.customer_info.address)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string(6, 0, "Date:")
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string(6, 1, format_estimate_date(estimate.date))
        .map_err(|e| Error::Export(e.to_string()))?;

    // Item table
    let headers = ["Service", "Detail", "Amount"];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(8, col as u16, *header, &header_format)
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    let breakdown = EstimateBreakdown::from_estimate(estimate);
    let mut row = 9;
    for item in &breakdown.rows {
        sheet
            .write_string(row, 0, item.title())
            .map_err(|e| Error::Export(e.to_string()))?;
        sheet
            .write_string(row, 1, item.detail())
            .map_err(|e| Error::Export(e.to_string()))?;
        sheet
            .write_number_with_format(row, 2, item.cost(), &money_format)
            .map_err(|e| Error::Export(e.to_string()))?;
        row += 1;
    }

    // Totals
    row += 1;
    sheet
        .write_string(row, 1, "Sub-total")
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_number_with_format(row, 2, breakdown.sub_total, &money_format)
        .map_err(|e| Error::Export(e.to_string()))?;
    row += 1;

    if let Some(adjustment) = breakdown.adjustment {
        sheet
            .write_string(row, 1, "Minimum Charge Adjustment")
            .map_err(|e| Error::Export(e.to_string()))?;
        sheet
            .write_number_with_format(row, 2, adjustment, &money_format)
            .map_err(|e| Error::Export(e.to_string()))?;
        row += 1;
    }

    sheet
        .write_string_with_format(row, 1, "Final Estimate", &header_format)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_number_with_format(row, 2, breakdown.final_total, &total_format)
        .map_err(|e| Error::Export(e.to_string()))?;

    Ok(())
}
