use crate::config::Settings;
use crate::domain::market::IndexRecord;
use crate::domain::news::NewsRecord;
use crate::ingest::loader::{self, DatasetError};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<T>,
    diagnostic: Option<String>,
}

impl<T> Table<T> {
    pub fn from_rows(rows: Vec<T>) -> Self {
        Self {
            rows,
            diagnostic: None,
        }
    }

    /// Runs `load`; on failure logs, keeps a readable diagnostic, and yields an empty table.
    pub fn load_or_empty(
        dataset: &'static str,
        load: impl FnOnce() -> Result<Vec<T>, DatasetError>,
    ) -> Self {
        match load() {
            Ok(rows) => {
                tracing::info!(dataset, rows = rows.len(), "dataset loaded");
                Self::from_rows(rows)
            }
            Err(err) => {
                let detail = error_chain(&err);
                tracing::error!(dataset, error = %detail, "dataset load failed; continuing with empty table");
                Self {
                    rows: Vec::new(),
                    diagnostic: Some(format!("Error loading {dataset} data: {detail}")),
                }
            }
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub indices: PathBuf,
    pub news: PathBuf,
}

impl DatasetPaths {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            indices: settings.indices_csv.clone(),
            news: settings.news_csv.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarketContext {
    indices: Table<IndexRecord>,
    news: Table<NewsRecord>,
}

impl MarketContext {
    pub fn load(paths: &DatasetPaths) -> Self {
        let indices = Table::load_or_empty("indices", || loader::load_indices(&paths.indices));
        let news = Table::load_or_empty("news", || loader::load_news(&paths.news));
        Self { indices, news }
    }

    pub fn from_tables(indices: Table<IndexRecord>, news: Table<NewsRecord>) -> Self {
        Self { indices, news }
    }

    pub fn indices(&self) -> &Table<IndexRecord> {
        &self.indices
    }

    pub fn news(&self) -> &Table<NewsRecord> {
        &self.news
    }

    pub fn diagnostics(&self) -> Vec<&str> {
        [self.indices.diagnostic(), self.news.diagnostic()]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(source) = cur {
        out.push_str(": ");
        out.push_str(&source.to_string());
        cur = source.source();
    }
    out
}
