//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{UserField, UserRecord};
use crate::infrastructure::traits::UserRepository;
use async_trait::async_trait;
use di::{Ref, injectable};
use log::error;

#[injectable(UserRepository)]
pub struct DbUserRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl UserRepository for DbUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, username, conversation_history, mood_history, goals FROM user WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&**self.connection)
        .await
        .inspect_err(|e| error!("{e}"))
    }

    async fn upsert_field(
        &self,
        username: &str,
        field: UserField,
        value: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let column = field.column();
        sqlx::query(&format!(
            "INSERT INTO user (username, {column}) VALUES (?, ?) \
             ON CONFLICT (username) DO UPDATE SET {column} = excluded.{column}"
        ))
        .bind(username)
        .bind(value)
        .execute(&**self.connection)
        .await
        .inspect_err(|e| error!("{e}"))?;

        Ok(())
    }

    async fn update_field(
        &self,
        username: &str,
        field: UserField,
        value: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let column = field.column();
        let result = sqlx::query(&format!("UPDATE user SET {column} = ? WHERE username = ?"))
            .bind(value)
            .bind(username)
            .execute(&**self.connection)
            .await
            .inspect_err(|e| error!("{e}"))?;

        Ok(result.rows_affected() > 0)
    }
}
