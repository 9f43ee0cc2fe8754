use crate::llm::Provider;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Http,
    Blocked,
    EmptyResponse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Http => "http",
            Self::Blocked => "blocked",
            Self::EmptyResponse => "empty_response",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct LlmDiagnosticsError {
    pub provider: Provider,
    pub stage: Stage,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}

impl LlmDiagnosticsError {
    pub fn service_message(&self) -> Option<&str> {
        self.raw_response_json
            .as_ref()?
            .pointer("/error/message")?
            .as_str()
    }
}

impl fmt::Display for LlmDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LLM error (provider={:?}, stage={}): {}",
            self.provider, self.stage, self.detail
        )?;
        if let Some(msg) = self.service_message() {
            write!(f, " ({msg})")?;
        }
        Ok(())
    }
}

impl std::error::Error for LlmDiagnosticsError {}
