//! DI "Interfaces"

use crate::core::sentiment::Classification;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Result of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
    pub mood: Classification,
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Classifies `message`, picks a reply and appends the turn to the user's history.
    ///
    /// Creates the user if it does not exist yet. Classifier failures do not fail the call.
    async fn chat(&self, username: &str, message: &str) -> Result<ChatReply, ServiceError>;

    /// Replaces the user's goal, creating the user if needed. `None` unsets it.
    async fn set_goal(&self, username: &str, goal: Option<&str>) -> Result<(), ServiceError>;

    /// Returns the current goal, which may be unset.
    ///
    /// Returns `Err(ServiceError::UserNotFound)` for unknown users.
    async fn get_goal(&self, username: &str) -> Result<Option<String>, ServiceError>;

    /// Drops the conversation history, leaving the goal untouched.
    ///
    /// Returns `Err(ServiceError::UserNotFound)` for unknown users.
    async fn clear_history(&self, username: &str) -> Result<(), ServiceError>;
}
