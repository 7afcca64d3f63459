use std::{future::Future, time::Duration};

use serde_json::Value;

use crate::domain::common::entities::app_errors::CoreError;

/// Key/value store for generated documents.
#[cfg_attr(test, mockall::automock)]
pub trait CacheStore: Send + Sync {
    fn get(&self, key: String) -> impl Future<Output = Result<Option<Value>, CoreError>> + Send;

    /// `ttl: None` stores without expiry.
    fn set(
        &self,
        key: String,
        value: Value,
        ttl: Option<Duration>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
