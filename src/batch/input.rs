//! Reading the uploaded table and locating the address column.

use crate::core::error::{AppError, Result};
use std::fs::File;
use std::io;
use std::path::Path;

/// A CSV table held in memory: header names plus raw cell values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl EmailTable {
    /// Reads a header row followed by data rows. Short rows are allowed; their
    /// missing cells read as empty strings.
    pub fn from_reader<R: io::Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path, delimiter: u8) -> Result<Self> {
        let file = File::open(path)?;
        let table = Self::from_reader(file, delimiter)?;
        tracing::info!(
            target: "batch",
            "Read {} rows with columns [{}] from {}",
            table.len(),
            table.headers.join(", "),
            path.display()
        );
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Values of the column literally named `name`, in row order.
    ///
    /// Fails with [`AppError::MissingColumn`] when no such header exists.
    pub fn column(&self, name: &str) -> Result<Vec<String>> {
        let index = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| AppError::MissingColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })?;

        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect())
    }
}
