// Statistical Classifier Service Client
// Talks to the sidecar wrapping the pretrained genspec text classifier.
// The model itself is a black box: sentence in, label + score out.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::models::Label;

/// Classifier service URL
const DEFAULT_CLASSIFIER_URL: &str = "http://127.0.0.1:8791";

/// Maximum input length the model accepts; longer sentences are truncated
/// (mirrors the pipeline's truncation behavior).
pub const CLASSIFIER_MAX_INPUT_CHARS: usize = 512;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("classifier service returned status {0}")]
    ServiceError(u16),
    #[error("failed to parse classifier response: {0}")]
    InvalidResponse(String),
    #[error("classifier returned unexpected label: {0}")]
    UnexpectedLabel(String),
}

/// One classification result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: Label,
    pub score: f64,
}

/// Narrow interface for the external statistical classifier, so the dual
/// classifier can run against a stub in tests.
pub trait SentenceClassifier {
    fn classify_one(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Classification, ClassifierError>> + Send;
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    label: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Shared HTTP client singleton
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

fn get_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client")
    })
}

/// Truncate to a char boundary at `max_chars` Unicode scalars.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn parse_label(raw: &str) -> Result<Label, ClassifierError> {
    // LABEL_0 / LABEL_1 are the raw head names of the underlying model.
    match raw {
        "GENERAL" | "LABEL_0" => Ok(Label::General),
        "SPECIFIC" | "LABEL_1" => Ok(Label::Specific),
        other => Err(ClassifierError::UnexpectedLabel(other.to_string())),
    }
}

/// HTTP client for the classifier sidecar.
pub struct ClassifierClient {
    base_url: String,
}

impl Default for ClassifierClient {
    fn default() -> Self {
        Self::new(DEFAULT_CLASSIFIER_URL)
    }
}

impl ClassifierClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check whether the sidecar is up.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match get_client().get(&url).send().await {
            Ok(resp) => match resp.json::<HealthResponse>().await {
                Ok(health) => health.status == "ok",
                Err(_) => false,
            },
            Err(_) => false,
        }
    }
}

impl SentenceClassifier for ClassifierClient {
    async fn classify_one(&self, text: &str) -> Result<Classification, ClassifierError> {
        let url = format!("{}/classify", self.base_url);
        let truncated = truncate_chars(text, CLASSIFIER_MAX_INPUT_CHARS);
        let request = ClassifyRequest { text: truncated };

        let response = get_client().post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(ClassifierError::ServiceError(response.status().as_u16()));
        }

        let result: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        let label = parse_label(&result.label)?;
        info!(
            "[CLASSIFIER] label={} score={:.3} chars={}",
            result.label,
            result.score,
            truncated.chars().count()
        );

        Ok(Classification {
            label,
            score: result.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_is_char_safe() {
        let text = "мы решили действовать";
        let cut = truncate_chars(text, 9);
        assert_eq!(cut, "мы решили");
        assert_eq!(truncate_chars("short", 512), "short");
    }

    #[test]
    fn test_parse_label_accepts_both_namings() {
        assert_eq!(parse_label("GENERAL").unwrap(), Label::General);
        assert_eq!(parse_label("LABEL_0").unwrap(), Label::General);
        assert_eq!(parse_label("SPECIFIC").unwrap(), Label::Specific);
        assert_eq!(parse_label("LABEL_1").unwrap(), Label::Specific);
        assert!(matches!(
            parse_label("LABEL_2"),
            Err(ClassifierError::UnexpectedLabel(_))
        ));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = ClassifierClient::default();
        assert_eq!(client.base_url, DEFAULT_CLASSIFIER_URL);
    }
}
