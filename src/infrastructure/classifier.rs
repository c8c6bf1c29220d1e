//! HTTP client for a hosted text-classification model.
//!
//! Speaks the Hugging Face inference shape: the request is `{"inputs": text}` and the
//! response is a list of `{label, score}` candidates, sometimes wrapped in an outer list.

use crate::config::Settings;
use crate::infrastructure::traits::SentimentClassifier;
use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct HttpSentimentClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Flat(Vec<LabelScore>),
    Batched(Vec<Vec<LabelScore>>),
}

impl ClassifyResponse {
    fn top_label(self) -> Option<String> {
        let candidates = match self {
            ClassifyResponse::Flat(candidates) => candidates,
            ClassifyResponse::Batched(batches) => batches.into_iter().next()?,
        };

        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|c| c.label)
    }
}

impl HttpSentimentClassifier {
    pub fn new(settings: &Settings) -> anyhow::Result<HttpSentimentClassifier> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.classifier_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(HttpSentimentClassifier {
            client,
            endpoint: settings.classifier_url.clone(),
            api_token: settings.classifier_api_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    async fn classify(&self, text: &str) -> anyhow::Result<String> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("classifier returned {status}: {body}");
        }

        let parsed: ClassifyResponse = response
            .json()
            .await
            .context("classifier returned an unexpected body")?;
        let label = parsed
            .top_label()
            .ok_or_else(|| anyhow!("classifier returned no labels"))?;

        debug!("classified {} chars as {label}", text.len());
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Option<String> {
        serde_json::from_str::<ClassifyResponse>(json)
            .unwrap()
            .top_label()
    }

    #[test]
    fn picks_highest_score_from_flat_list() {
        let json = r#"[{"label":"NEGATIVE","score":0.1},{"label":"POSITIVE","score":0.9}]"#;
        assert_eq!(parse(json).as_deref(), Some("POSITIVE"));
    }

    #[test]
    fn unwraps_batched_list() {
        let json = r#"[[{"label":"NEGATIVE","score":0.98},{"label":"POSITIVE","score":0.02}]]"#;
        assert_eq!(parse(json).as_deref(), Some("NEGATIVE"));
    }

    #[test]
    fn empty_lists_have_no_label() {
        assert_eq!(parse("[]"), None);
        assert_eq!(parse("[[]]"), None);
    }
}
