//! Mood-aware chat API - Library exports for testing
//!
//! (c) Softlandia 2025

pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

use crate::core::locks::UserLocks;
use crate::core::services::MoodChatService;
use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::repositories::DbUserRepository;
use crate::infrastructure::traits::SentimentClassifier;
use anyhow::anyhow;
use di::{Injectable, ServiceCollection, ServiceProvider, existing, existing_as_self};

/// Registers the database, the classifier and the request-scoped services.
pub fn build_provider<C>(
    database: DatabaseConnection,
    classifier: C,
    locks: UserLocks,
) -> anyhow::Result<ServiceProvider>
where
    C: SentimentClassifier + 'static,
{
    ServiceCollection::new()
        .add(existing_as_self(database))
        .add(existing::<dyn SentimentClassifier, C>(Box::new(classifier)))
        .add(existing_as_self(locks))
        .add(DbUserRepository::scoped())
        .add(MoodChatService::scoped())
        .build_provider()
        .map_err(|e| anyhow!("failed to build service provider: {e:?}"))
}
