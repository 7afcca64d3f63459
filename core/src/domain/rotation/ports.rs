use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    rotation::entities::{RotationRecord, RotationWindow},
};

#[cfg_attr(test, mockall::automock)]
pub trait RotationRepository: Send + Sync {
    /// Upserts on `(user_id, week_start)`.
    fn record_week(&self, record: RotationRecord) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn recent_weeks(
        &self,
        user_id: String,
        window: RotationWindow,
    ) -> impl Future<Output = Result<Vec<RotationRecord>, CoreError>> + Send;
}
