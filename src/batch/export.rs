//! Writing a [`BatchResult`] out as a spreadsheet, CSV or JSON.

use crate::core::error::{AppError, Result};
use crate::core::models::{BatchResult, RECORD_HEADERS};
use rust_xlsxwriter::{Format, Workbook};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Output file formats for bulk results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// Guesses the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::Config(format!(
                "Unsupported export format '{}' (expected xlsx, csv or json)",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

fn build_workbook(result: &BatchResult, sheet_name: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in RECORD_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    for (row, record) in result.records().iter().enumerate() {
        for (col, value) in record.cells().iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, *value)?;
        }
    }
    worksheet.autofit();

    Ok(workbook)
}

/// Writes an `.xlsx` workbook with a bold header row.
pub fn write_xlsx(result: &BatchResult, path: &Path, sheet_name: &str) -> Result<()> {
    let mut workbook = build_workbook(result, sheet_name)?;
    workbook.save(path)?;
    Ok(())
}

/// Renders the workbook into memory instead of a file.
pub fn xlsx_bytes(result: &BatchResult, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(result, sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}

/// Writes the header row and one row per verdict.
pub fn write_csv<W: Write>(result: &BatchResult, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(RECORD_HEADERS)?;
    for record in result.records() {
        writer.write_record(record.cells())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a pretty-printed JSON array of records.
pub fn write_json<W: Write>(result: &BatchResult, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &result.records())?;
    writeln!(writer)?;
    Ok(())
}

/// Writes `result` to `path` in `format`.
pub fn export(result: &BatchResult, path: &Path, format: ExportFormat, sheet_name: &str) -> Result<()> {
    match format {
        ExportFormat::Xlsx => write_xlsx(result, path, sheet_name)?,
        ExportFormat::Csv => write_csv(result, BufWriter::new(File::create(path)?))?,
        ExportFormat::Json => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_json(result, &mut writer)?;
            writer.flush()?;
        }
    }
    tracing::info!(
        target: "batch",
        "Exported {} rows as {} to {}",
        result.len(),
        format,
        path.display()
    );
    Ok(())
}

/// Writes `result` to stdout in a text format.
pub fn export_stdout(result: &BatchResult, format: ExportFormat) -> Result<()> {
    let stdout = io::stdout();
    let handle = stdout.lock();
    match format {
        ExportFormat::Csv => write_csv(result, handle),
        ExportFormat::Json => write_json(result, handle),
        ExportFormat::Xlsx => Err(AppError::Config(
            "xlsx output needs a file path".to_string(),
        )),
    }
}
