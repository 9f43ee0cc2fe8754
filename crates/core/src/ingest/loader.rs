use crate::domain::market::{IndexRecord, INDEX_COLUMNS};
use crate::domain::news::{NewsRecord, NEWS_COLUMNS};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV header of {}", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required columns: {}", .path.display(), .missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("invalid row at line {line} of {}", .path.display())]
    Row {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("non-finite value in column {column:?} at line {line} of {}", .path.display())]
    NonFinite {
        path: PathBuf,
        line: u64,
        column: &'static str,
    },
}

pub fn load_indices(path: &Path) -> Result<Vec<IndexRecord>, DatasetError> {
    read_indices(open(path)?, path)
}

pub fn load_news(path: &Path) -> Result<Vec<NewsRecord>, DatasetError> {
    read_news(open(path)?, path)
}

pub fn read_indices<R: Read>(reader: R, origin: &Path) -> Result<Vec<IndexRecord>, DatasetError> {
    read_table(reader, origin, &INDEX_COLUMNS, non_finite_column)
}

pub fn read_news<R: Read>(reader: R, origin: &Path) -> Result<Vec<NewsRecord>, DatasetError> {
    read_table(reader, origin, &NEWS_COLUMNS, |_: &NewsRecord| None)
}

fn non_finite_column(record: &IndexRecord) -> Option<&'static str> {
    [
        (INDEX_COLUMNS[3], record.start_price),
        (INDEX_COLUMNS[4], record.end_price),
        (INDEX_COLUMNS[5], record.percent_change),
    ]
    .into_iter()
    .find(|(_, v)| !v.is_finite())
    .map(|(column, _)| column)
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_table<T, R>(
    reader: R,
    origin: &Path,
    columns: &[&str],
    invalid_column: fn(&T) -> Option<&'static str>,
) -> Result<Vec<T>, DatasetError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| DatasetError::Header {
            path: origin.to_path_buf(),
            source,
        })?
        .clone();

    // Validate the schema up front so a renamed column fails here, not downstream.
    let missing: Vec<String> = columns
        .iter()
        .filter(|c| !headers.iter().any(|h| h == **c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns {
            path: origin.to_path_buf(),
            missing,
        });
    }

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| DatasetError::Row {
            path: origin.to_path_buf(),
            line: source.position().map(|p| p.line()).unwrap_or_default(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|source| DatasetError::Row {
                path: origin.to_path_buf(),
                line,
                source,
            })?;
        // f64 parsing accepts "NaN" and "inf".
        if let Some(column) = invalid_column(&row) {
            return Err(DatasetError::NonFinite {
                path: origin.to_path_buf(),
                line,
                column,
            });
        }
        out.push(row);
    }

    Ok(out)
}
