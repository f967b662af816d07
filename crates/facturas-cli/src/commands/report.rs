//! Report writers: one row per invoice record.

use std::fs;
use std::io::Write;
use std::path::Path;

use facturas_core::{InvoiceRecord, REPORT_HEADERS};

/// File format of a batch report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Comma separated rows with a header line
    Csv,
    /// JSON array of records
    Json,
}

impl ReportFormat {
    /// Infer the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Csv,
        }
    }
}

/// Write records as CSV rows under the standard headers.
pub fn write_csv<W: Write>(writer: W, records: &[InvoiceRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(REPORT_HEADERS)?;
    for record in records {
        wtr.write_record(record.report_row())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the report file, creating its directory when needed.
pub fn write_report(path: &Path, format: ReportFormat, records: &[InvoiceRecord]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match format {
        ReportFormat::Csv => write_csv(fs::File::create(path)?, records)?,
        ReportFormat::Json => fs::write(path, serde_json::to_string_pretty(records)?)?,
    }

    Ok(())
}

/// Human-readable summary of one record.
pub fn format_record_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", record.file_name));
    output.push_str(&format!("Status: {}\n", record.status()));
    output.push('\n');

    for (header, value) in REPORT_HEADERS.iter().zip(record.report_row()).take(14) {
        if !value.is_empty() {
            output.push_str(&format!("{:<20} {}\n", format!("{}:", header), value));
        }
    }

    if !record.issues().is_empty() {
        output.push_str("\nIssues:\n");
        for issue in record.issues() {
            output.push_str(&format!("  - {}\n", issue));
        }
    }

    output
}
