//! Implementations for the service the app needs.
//!

use crate::core::locks::UserLocks;
use crate::core::replies::{NEUTRAL_REPLY, select_reply};
use crate::core::sentiment::{Classification, detect_emotion};
use crate::core::traits::{ChatReply, ChatService, ServiceError};
use crate::infrastructure::entities::UserField;
use crate::infrastructure::traits::{SentimentClassifier, UserRepository};
use async_trait::async_trait;
use di::{Ref, injectable};
use log::debug;

#[injectable(ChatService)]
pub struct MoodChatService {
    repo: Ref<dyn UserRepository>,
    classifier: Ref<dyn SentimentClassifier>,
    locks: Ref<UserLocks>,
}

/// Appends one exchange to a transcript, starting a new one when it is empty.
pub fn append_turn(history: Option<&str>, message: &str, response: &str) -> String {
    match history {
        Some(history) if !history.is_empty() => {
            format!("{history}\nUser: {message}\nBot: {response}")
        }
        _ => format!("User: {message}\nBot: {response}"),
    }
}

#[async_trait]
impl ChatService for MoodChatService {
    async fn chat(&self, username: &str, message: &str) -> Result<ChatReply, ServiceError> {
        let mood = detect_emotion(&*self.classifier, message).await;
        let response = match &mood {
            Classification::Label(label) => select_reply(label),
            Classification::Failed { .. } => NEUTRAL_REPLY,
        };

        let _guard = self.locks.acquire(username).await;
        let history = self
            .repo
            .find_by_username(username)
            .await?
            .and_then(|user| user.conversation_history);
        let history = append_turn(history.as_deref(), message, response);
        self.repo
            .upsert_field(username, UserField::ConversationHistory, Some(&history))
            .await?;
        debug!("appended turn for {username:?}");

        Ok(ChatReply {
            response: response.to_owned(),
            mood,
        })
    }

    async fn set_goal(&self, username: &str, goal: Option<&str>) -> Result<(), ServiceError> {
        self.repo
            .upsert_field(username, UserField::Goals, goal)
            .await?;

        Ok(())
    }

    async fn get_goal(&self, username: &str) -> Result<Option<String>, ServiceError> {
        self.repo
            .find_by_username(username)
            .await?
            .map(|user| user.goals)
            .ok_or(ServiceError::UserNotFound)
    }

    async fn clear_history(&self, username: &str) -> Result<(), ServiceError> {
        let cleared = self
            .repo
            .update_field(username, UserField::ConversationHistory, None)
            .await?;

        if cleared {
            Ok(())
        } else {
            Err(ServiceError::UserNotFound)
        }
    }
}
