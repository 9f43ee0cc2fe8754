use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_INDICES_CSV: &str = "global_indices.csv";
const DEFAULT_NEWS_CSV: &str = "global_finance_news.csv";
const DEFAULT_LOCAL_CONFIG: &str = "config.toml";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is required in headless mode; add it to the environment")]
    MissingEnvCredential,

    #[error("gemini_api_key is not set in local config {path}")]
    MissingLocalCredential { path: PathBuf },

    #[error("failed to read local config {path}")]
    ReadLocal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse local config {path}")]
    ParseLocal {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    LocalFile(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout: Duration,
    pub headless: bool,
    pub local_config_path: PathBuf,
    pub sentry_dsn: Option<String>,
    pub indices_csv: PathBuf,
    pub news_csv: PathBuf,
    pub report_output_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let gemini_timeout_secs = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECS);

        Ok(Self {
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: non_empty_var("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: non_empty_var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_timeout: Duration::from_secs(gemini_timeout_secs),
            headless: std::env::var("TARIFF_HEADLESS").is_ok_and(|v| v.trim() == "1"),
            local_config_path: path_var("TARIFF_LOCAL_CONFIG", DEFAULT_LOCAL_CONFIG),
            sentry_dsn: non_empty_var("SENTRY_DSN"),
            indices_csv: path_var("INDICES_CSV", DEFAULT_INDICES_CSV),
            news_csv: path_var("NEWS_CSV", DEFAULT_NEWS_CSV),
            report_output_dir: path_var("REPORT_OUTPUT_DIR", "."),
        })
    }

    pub fn credential_source(&self) -> CredentialSource {
        if self.headless {
            CredentialSource::Environment
        } else {
            CredentialSource::LocalFile(self.local_config_path.clone())
        }
    }

    pub fn require_gemini_api_key(&self) -> Result<String, ConfigError> {
        match self.credential_source() {
            CredentialSource::Environment => self
                .gemini_api_key
                .clone()
                .ok_or(ConfigError::MissingEnvCredential),
            CredentialSource::LocalFile(path) => {
                let local = LocalConfig::read(&path)?;
                local
                    .gemini_api_key
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(ConfigError::MissingLocalCredential { path })
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalConfig {
    #[serde(default)]
    pub gemini_api_key: Option<String>,
}

impl LocalConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadLocal {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::ParseLocal {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn path_var(key: &str, default: &str) -> PathBuf {
    non_empty_var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
