use std::time::Duration;

use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DeleteMany, EntityTrait,
    QueryFilter, sea_query::OnConflict,
};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::domain::{cache::ports::CacheStore, common::entities::app_errors::CoreError};
use crate::entity::generation_cache::{
    ActiveModel as CacheActiveModel, Column as CacheColumn, Entity as CacheEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresCacheStore {
    pub db: DatabaseConnection,
}

impl PostgresCacheStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Deletes rows whose TTL has passed. Rows without expiry are kept.
    pub async fn purge_expired(&self) -> Result<u64, CoreError> {
        let result = purge_expired_query(Utc::now().naive_utc())
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to purge expired cache entries: {}", e);
                CoreError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected)
    }
}

fn purge_expired_query(now: NaiveDateTime) -> DeleteMany<CacheEntity> {
    CacheEntity::delete_many().filter(CacheColumn::ExpiresAt.lte(now))
}

impl CacheStore for PostgresCacheStore {
    async fn get(&self, key: String) -> Result<Option<Value>, CoreError> {
        let now = Utc::now().naive_utc();

        let entry = CacheEntity::find_by_id(key)
            .filter(
                Condition::any()
                    .add(CacheColumn::ExpiresAt.is_null())
                    .add(CacheColumn::ExpiresAt.gt(now)),
            )
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to read cache entry: {}", e);
                CoreError::DatabaseError(e.to_string())
            })?;

        Ok(entry.map(|model| model.value))
    }

    async fn set(&self, key: String, value: Value, ttl: Option<Duration>) -> Result<(), CoreError> {
        let now = Utc::now();
        let expires_at = ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .map(|ttl| (now + ttl).naive_utc());

        CacheEntity::insert(CacheActiveModel {
            key: Set(key),
            value: Set(value),
            expires_at: Set(expires_at),
            created_at: Set(now.naive_utc()),
        })
        .on_conflict(
            OnConflict::column(CacheColumn::Key)
                .update_columns([CacheColumn::Value, CacheColumn::ExpiresAt, CacheColumn::CreatedAt])
                .to_owned(),
        )
        .exec(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to write cache entry: {}", e);
            CoreError::DatabaseError(e.to_string())
        })?;

        // only entries written with a TTL can expire
        if expires_at.is_some() {
            match self.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => debug!(purged, "purged expired cache entries"),
                Err(e) => warn!("cache purge skipped: {}", e),
            }
        }

        Ok(())
    }
}
