pub mod annotate;
pub mod document;
pub mod html;
pub mod map;
pub mod markup;
pub mod table;

use crate::domain::market::IndexRecord;
use crate::ingest::MarketContext;
use crate::llm::{LlmClient, ReportInput};
use crate::time::AnalysisPeriod;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use document::{DocumentParts, RenderedDocument};
pub use map::ChoroplethMap;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no market index data available; the report needs the indices table")]
    NoIndexData,

    #[error("failed to generate report: {0:#}")]
    Generation(anyhow::Error),
}

/// Absent or blank text short-circuits to `None` before any parsing.
pub fn postprocess(
    report_text: Option<&str>,
    indices: &[IndexRecord],
    period: &AnalysisPeriod,
    generated_at: DateTime<Utc>,
) -> Option<RenderedDocument> {
    let text = report_text.map(str::trim).filter(|t| !t.is_empty())?;

    let mut tree = markup::parse(text);
    annotate::annotate(&mut tree);

    let parts = DocumentParts {
        narrative_html: html::render(&tree),
        map_html: ChoroplethMap::from_records(indices).map(|m| m.to_html()),
        table_html: table::render_data_table(indices, period),
    };
    Some(document::assemble(&parts, period, generated_at))
}

pub async fn generate_document(
    ctx: &MarketContext,
    client: &dyn LlmClient,
    period: &AnalysisPeriod,
    generated_at: DateTime<Utc>,
) -> Result<Option<RenderedDocument>, ReportError> {
    let indices = ctx.indices().rows();
    if indices.is_empty() {
        return Err(ReportError::NoIndexData);
    }

    let input = ReportInput::try_new(*period, ctx.news().rows(), indices)
        .map_err(ReportError::Generation)?;
    let text = client
        .generate_report(input)
        .await
        .map_err(ReportError::Generation)?;

    let document = postprocess(Some(&text), indices, period, generated_at);
    if document.is_none() {
        tracing::warn!(provider = ?client.provider(), "model returned an empty report");
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::news::NewsRecord;
    use crate::ingest::Table;
    use crate::llm::error::{LlmDiagnosticsError, Stage};
    use crate::llm::Provider;
    use chrono::TimeZone;
    use std::sync::Mutex;

    const REPORT: &str = "\
## Executive Summary

Global equities posted a **sharp decline** with Japan **down -10.1%**.

## Interesting Take

* **Resilient alternatives grow** in Southeast Asia
";

    struct CannedClient {
        reply: Result<String, Stage>,
        seen: Mutex<Option<ReportInput>>,
    }

    impl CannedClient {
        fn new(reply: Result<&str, Stage>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for CannedClient {
        fn provider(&self) -> Provider {
            Provider::Gemini
        }

        async fn generate_report(&self, input: ReportInput) -> anyhow::Result<String> {
            *self.seen.lock().unwrap() = Some(input);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(stage) => Err(LlmDiagnosticsError {
                    provider: Provider::Gemini,
                    stage: *stage,
                    detail: "status=403 Forbidden".to_string(),
                    raw_output: None,
                    raw_response_json: None,
                }
                .into()),
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 9, 8, 30, 0).unwrap()
    }

    fn indices() -> Vec<IndexRecord> {
        vec![
            IndexRecord::new("Japan", "Nikkei 225", "^N225", 35624.48, 32013.58, -10.14),
            IndexRecord::new("Brazil", "Bovespa", "^BVSP", 131147.0, 127256.0, 1.0),
            IndexRecord::new("Atlantis", "Atlas 10", "ATL-10", 10.0, 9.0, -2.5),
        ]
    }

    fn context(indices: Vec<IndexRecord>) -> MarketContext {
        let news = (0..7)
            .map(|i| NewsRecord {
                country: "Japan".to_string(),
                date: format!("2025-04-0{}", i + 1),
                source: "Wire".to_string(),
                title: format!("headline {i}"),
                url: "https://example.com".to_string(),
            })
            .collect();
        MarketContext::from_tables(Table::from_rows(indices), Table::from_rows(news))
    }

    #[test]
    fn absent_or_blank_text_produces_no_document() {
        let period = AnalysisPeriod::default();
        assert!(postprocess(None, &indices(), &period, now()).is_none());
        assert!(postprocess(Some(""), &indices(), &period, now()).is_none());
        assert!(postprocess(Some("  \n\t"), &indices(), &period, now()).is_none());
    }

    #[test]
    fn postprocess_assembles_annotated_document() {
        let doc = postprocess(Some(REPORT), &indices(), &AnalysisPeriod::default(), now()).unwrap();
        let html = &doc.html;

        assert!(html.contains("<h2 class=\"section-header\">Executive Summary</h2>"));
        assert!(html.contains("<strong class=\"negative\">sharp decline</strong>"));
        assert!(html.contains("<strong class=\"negative\">down -10.1%</strong>"));
        assert!(html.contains("<strong class=\"positive\">Resilient alternatives grow</strong>"));

        // The +1.0% row is positive in the table regardless of narrative wording.
        assert!(html.contains("<td class=\"positive\">1.00%</td>"));
        // Atlantis has no geometry but still appears in the table.
        assert!(html.contains("<td>Atlantis</td>"));
        assert!(html.contains("Plotly.newPlot"));
        assert_eq!(doc.file_name, "tariff_report_20250409.html");
    }

    #[tokio::test]
    async fn pipeline_sends_truncated_news_and_renders_reply() {
        let ctx = context(indices());
        let client = CannedClient::new(Ok(REPORT));

        let doc = generate_document(&ctx, &client, &AnalysisPeriod::default(), now())
            .await
            .unwrap()
            .unwrap();
        assert!(doc.html.contains("Executive Summary"));

        let seen = client.seen.lock().unwrap().take().unwrap();
        assert_eq!(seen.news_headlines.as_array().unwrap().len(), 5);
        assert_eq!(seen.market_data.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn pipeline_refuses_without_indices() {
        let ctx = context(Vec::new());
        let client = CannedClient::new(Ok(REPORT));

        let err = generate_document(&ctx, &client, &AnalysisPeriod::default(), now())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::NoIndexData));
        assert!(client.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn service_failure_propagates_without_document() {
        let ctx = context(indices());
        let client = CannedClient::new(Err(Stage::Http));

        let err = generate_document(&ctx, &client, &AnalysisPeriod::default(), now())
            .await
            .unwrap_err();
        let ReportError::Generation(inner) = err else {
            panic!("expected generation error");
        };
        let diag = inner.downcast_ref::<LlmDiagnosticsError>().unwrap();
        assert_eq!(diag.stage, Stage::Http);
    }

    #[tokio::test]
    async fn blank_reply_yields_no_document() {
        let ctx = context(indices());
        let client = CannedClient::new(Ok("   "));

        let doc = generate_document(&ctx, &client, &AnalysisPeriod::default(), now())
            .await
            .unwrap();
        assert!(doc.is_none());
    }
}
