//! CSV tables for training, target and output datasets.

use crate::mapping::TrainingPair;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const INPUT_COLUMN: &str = "input";
pub const OUTPUT_COLUMN: &str = "output";

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no `{column}` column")]
    MissingColumn { path: PathBuf, column: String },
    #[error("{path} has {actual} rows, expected {expected}")]
    RowCountMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
}

/// A header row plus string cells, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads a headed CSV file. A leading UTF-8 byte-order mark is dropped.
    ///
    /// Header names are trimmed so ` input ` still resolves to `input`.
    /// Cell values are kept verbatim: surrounding spaces are part of the
    /// text and restoration passes them through untouched.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|source| DatasetError::Read {
            path: path.clone(),
            source,
        })?;
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

        let csv_err = |source| DatasetError::Csv {
            path: path.clone(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(content.as_bytes());
        let headers = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        debug!(path = %path.display(), rows = rows.len(), "loaded table");
        Ok(Self {
            path,
            headers,
            rows,
        })
    }

    pub fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            path: PathBuf::new(),
            headers,
            rows,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Result<usize, DatasetError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DatasetError::MissingColumn {
                path: self.path.clone(),
                column: column.to_string(),
            })
    }

    pub fn column(&self, column: &str) -> Result<Vec<&str>, DatasetError> {
        let idx = self.column_index(column)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or_default())
            .collect())
    }

    /// Replaces every cell of `column` with the matching entry of `values`.
    pub fn replace_column(&mut self, column: &str, values: Vec<String>) -> Result<(), DatasetError> {
        let idx = self.column_index(column)?;
        if values.len() != self.rows.len() {
            return Err(DatasetError::RowCountMismatch {
                path: self.path.clone(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            if let Some(cell) = row.get_mut(idx) {
                *cell = value;
            }
        }
        Ok(())
    }

    /// Writes the table as UTF-8 CSV prefixed with a byte-order mark.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref().to_path_buf();
        let write_err = |source| DatasetError::Write {
            path: path.clone(),
            source,
        };
        let csv_err = |source| DatasetError::Csv {
            path: path.clone(),
            source,
        };

        let mut file = fs::File::create(&path).map_err(write_err)?;
        file.write_all(UTF8_BOM.as_bytes()).map_err(write_err)?;

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);
        writer.write_record(&self.headers).map_err(csv_err)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_err)?;
        }
        writer.flush().map_err(write_err)?;
        debug!(path = %path.display(), rows = self.rows.len(), "wrote table");
        Ok(())
    }
}

/// Loads `input`/`output` pairs from a training CSV.
pub fn load_training_pairs(path: impl AsRef<Path>) -> Result<Vec<TrainingPair>, DatasetError> {
    let table = Table::read(path)?;
    let inputs = table.column(INPUT_COLUMN)?;
    let outputs = table.column(OUTPUT_COLUMN)?;
    Ok(inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| TrainingPair::new(input, output))
        .collect())
}

/// Loads a target CSV and checks it has an `input` column.
pub fn load_target(path: impl AsRef<Path>) -> Result<Table, DatasetError> {
    let table = Table::read(path)?;
    table.column_index(INPUT_COLUMN)?;
    Ok(table)
}
