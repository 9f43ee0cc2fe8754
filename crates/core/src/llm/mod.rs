pub mod error;
pub mod gemini;
pub mod prompt;
pub mod text;

use crate::domain::market::IndexRecord;
use crate::domain::news::NewsRecord;
use crate::time::AnalysisPeriod;

pub const MAX_PROMPT_HEADLINES: usize = 5;

#[derive(Debug, Clone)]
pub struct ReportInput {
    pub period: AnalysisPeriod,
    pub market_data: serde_json::Value,
    pub news_headlines: serde_json::Value,
}

impl ReportInput {
    pub fn try_new(
        period: AnalysisPeriod,
        news: &[NewsRecord],
        indices: &[IndexRecord],
    ) -> anyhow::Result<Self> {
        let headlines = &news[..news.len().min(MAX_PROMPT_HEADLINES)];
        Ok(Self {
            period,
            market_data: serde_json::to_value(indices)?,
            news_headlines: serde_json::to_value(headlines)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> Provider;

    /// Returns the raw report text. Callers treat empty text as "no report".
    async fn generate_report(&self, input: ReportInput) -> anyhow::Result<String>;
}
