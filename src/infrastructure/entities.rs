//! Database entities

use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub conversation_history: Option<String>,
    /// Kept for schema compatibility; nothing reads or writes it.
    pub mood_history: Option<String>,
    pub goals: Option<String>,
}

/// The free-text columns a request may write. Each write touches exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    ConversationHistory,
    Goals,
}

impl UserField {
    pub fn column(self) -> &'static str {
        match self {
            UserField::ConversationHistory => "conversation_history",
            UserField::Goals => "goals",
        }
    }
}
