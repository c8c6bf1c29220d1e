//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities;
use crate::infrastructure::entities::UserField;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entities::UserRecord>, sqlx::Error>;

    /// Writes one column, creating the row with only that column set if the username is
    /// unknown. A single statement, so a failure leaves no row behind.
    async fn upsert_field(
        &self,
        username: &str,
        field: UserField,
        value: Option<&str>,
    ) -> Result<(), sqlx::Error>;

    /// Writes one column of an existing row. Returns `false` when no row matched.
    async fn update_field(
        &self,
        username: &str,
        field: UserField,
        value: Option<&str>,
    ) -> Result<bool, sqlx::Error>;
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Returns the top-ranked label for `text`.
    async fn classify(&self, text: &str) -> anyhow::Result<String>;
}
