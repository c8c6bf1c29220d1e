//! Sentiment detection on top of the injected classifier.

use crate::infrastructure::traits::SentimentClassifier;
use log::warn;

const FAILURE_PREFIX: &str = "Error detecting emotion from text";

/// Outcome of one classifier call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Label(String),
    Failed { detail: String },
}

impl Classification {
    /// The string clients see as `detected_mood`. Failures are reported in-band as a
    /// label-shaped error message, which the reply selector treats as neutral.
    pub fn into_mood(self) -> String {
        match self {
            Classification::Label(label) => label,
            Classification::Failed { detail } => format!("{FAILURE_PREFIX}: {detail}"),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Classification::Failed { .. })
    }
}

/// Calls the classifier once. Never fails; errors become [`Classification::Failed`].
pub async fn detect_emotion(classifier: &dyn SentimentClassifier, text: &str) -> Classification {
    match classifier.classify(text).await {
        Ok(label) => Classification::Label(label),
        Err(e) => {
            warn!("sentiment classification failed: {e:#}");
            Classification::Failed {
                detail: format!("{e:#}"),
            }
        }
    }
}
