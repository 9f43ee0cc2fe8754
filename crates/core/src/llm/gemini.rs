use crate::config::Settings;
use crate::llm::error::{LlmDiagnosticsError, Stage};
use crate::llm::{prompt, text, LlmClient, Provider, ReportInput};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_gemini_api_key()?;

        let http = reqwest::Client::builder()
            .timeout(settings.gemini_timeout)
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url: settings.gemini_base_url.clone(),
            model: settings.gemini_model.clone(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate_content(
        &self,
        req: GenerateContentRequest,
    ) -> anyhow::Result<(serde_json::Value, GenerateContentResponse)> {
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(&self.api_key)?);

        let res = self
            .http
            .post(self.url())
            .headers(headers)
            .json(&req)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("failed to read Gemini response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&body).ok();
            return Err(LlmDiagnosticsError {
                provider: Provider::Gemini,
                stage: Stage::Http,
                detail: format!("status={status}"),
                raw_output: Some(body),
                raw_response_json,
            }
            .into());
        }

        let raw_json = serde_json::from_str::<serde_json::Value>(&body)
            .with_context(|| format!("failed to parse Gemini response JSON: {body}"))?;
        let parsed = serde_json::from_value::<GenerateContentResponse>(raw_json.clone())
            .context("failed to decode Gemini response into GenerateContentResponse")?;
        Ok((raw_json, parsed))
    }

    fn request(input: &ReportInput) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt::build_prompt(input)),
                }],
            }],
        }
    }

    fn response_text(
        res: &GenerateContentResponse,
        raw_json: &serde_json::Value,
    ) -> Result<String, LlmDiagnosticsError> {
        if let Some(reason) = res
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(LlmDiagnosticsError {
                provider: Provider::Gemini,
                stage: Stage::Blocked,
                detail: format!("block_reason={reason}"),
                raw_output: None,
                raw_response_json: Some(raw_json.clone()),
            });
        }

        let candidate = res.candidates.first();
        let joined = candidate
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                text::join_parts(content.parts.iter().filter_map(|p| p.text.as_deref()))
            })
            .unwrap_or_default();

        let report = text::strip_outer_fence(&joined);
        if report.is_empty() {
            let finish_reason = candidate
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            return Err(LlmDiagnosticsError {
                provider: Provider::Gemini,
                stage: Stage::EmptyResponse,
                detail: format!("finish_reason={finish_reason}"),
                raw_output: Some(joined),
                raw_response_json: Some(raw_json.clone()),
            });
        }

        Ok(report.to_string())
    }
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn generate_report(&self, input: ReportInput) -> anyhow::Result<String> {
        tracing::info!(model = %self.model, "requesting tariff impact report");

        let (raw_json, res) = self.generate_content(Self::request(&input)).await?;

        if let Some(usage) = &res.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }

        let report = Self::response_text(&res, &raw_json)?;
        tracing::info!(chars = report.len(), "report text received");
        Ok(report)
    }
}

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::AnalysisPeriod;
    use serde_json::json;

    fn decode(v: serde_json::Value) -> (serde_json::Value, GenerateContentResponse) {
        let parsed = serde_json::from_value::<GenerateContentResponse>(v.clone()).unwrap();
        (v, parsed)
    }

    #[test]
    fn request_serializes_prompt_as_single_user_part() {
        let input = ReportInput::try_new(AnalysisPeriod::default(), &[], &[]).unwrap();
        let body = serde_json::to_value(GeminiClient::request(&input)).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Analyze this financial market data"));
    }

    #[test]
    fn joins_candidate_parts_and_strips_fence() {
        let (raw, res) = decode(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "```markdown\n## Executive Summary\n"}, {"text": "Markets **fell 10%**.\n```"}]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 20}
        }));

        let text = GeminiClient::response_text(&res, &raw).unwrap();
        assert_eq!(text, "## Executive Summary\nMarkets **fell 10%**.");
    }

    #[test]
    fn blocked_prompt_is_a_diagnostic_error() {
        let (raw, res) = decode(json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        }));

        let err = GeminiClient::response_text(&res, &raw).unwrap_err();
        assert_eq!(err.stage, Stage::Blocked);
        assert_eq!(err.detail, "block_reason=SAFETY");
    }

    #[test]
    fn empty_candidate_is_a_diagnostic_error() {
        let (raw, res) = decode(json!({
            "candidates": [{"content": {"parts": []}, "finishReason": "MAX_TOKENS"}]
        }));

        let err = GeminiClient::response_text(&res, &raw).unwrap_err();
        assert_eq!(err.stage, Stage::EmptyResponse);
        assert!(err.to_string().contains("finish_reason=MAX_TOKENS"));
    }

    #[test]
    fn url_joins_base_and_model() {
        let client = GeminiClient {
            http: reqwest::Client::new(),
            api_key: "k".to_string(),
            base_url: "https://example.test/".to_string(),
            model: "gemini-2.0-flash".to_string(),
        };
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
