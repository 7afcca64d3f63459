use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::OnConflict,
};
use serde_json::Value;
use tracing::error;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7},
    rotation::{
        entities::{RotationRecord, RotationWindow},
        ports::RotationRepository,
    },
};
use crate::entity::dish_rotation::{
    ActiveModel as DishRotationActiveModel, Column as DishRotationColumn,
    Entity as DishRotationEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresRotationRepository {
    pub db: DatabaseConnection,
}

impl PostgresRotationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RotationRepository for PostgresRotationRepository {
    async fn record_week(&self, record: RotationRecord) -> Result<(), CoreError> {
        DishRotationEntity::insert(DishRotationActiveModel {
            id: Set(generate_uuid_v7()),
            user_id: Set(record.user_id),
            week_start: Set(record.week_start),
            dishes: Set(Value::from(record.dishes)),
            created_at: Set(record.created_at.naive_utc()),
        })
        .on_conflict(
            OnConflict::columns([DishRotationColumn::UserId, DishRotationColumn::WeekStart])
                .update_columns([DishRotationColumn::Dishes, DishRotationColumn::CreatedAt])
                .to_owned(),
        )
        .exec(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to record dish rotation: {}", e);
            CoreError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn recent_weeks(
        &self,
        user_id: String,
        window: RotationWindow,
    ) -> Result<Vec<RotationRecord>, CoreError> {
        let records = DishRotationEntity::find()
            .filter(DishRotationColumn::UserId.eq(user_id))
            .filter(DishRotationColumn::WeekStart.gte(window.since))
            .filter(DishRotationColumn::WeekStart.lt(window.before))
            .order_by_desc(DishRotationColumn::WeekStart)
            .limit(u64::from(window.limit))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch dish rotation: {}", e);
                CoreError::DatabaseError(e.to_string())
            })?
            .into_iter()
            .map(RotationRecord::from)
            .collect();

        Ok(records)
    }
}
