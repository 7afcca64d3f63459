use chrono::{TimeZone, Utc};

use crate::domain::rotation::entities::RotationRecord;
use crate::entity::dish_rotation::Model as DishRotationModel;

impl From<DishRotationModel> for RotationRecord {
    fn from(model: DishRotationModel) -> Self {
        RotationRecord {
            user_id: model.user_id,
            week_start: model.week_start,
            dishes: serde_json::from_value(model.dishes).unwrap_or_default(),
            created_at: Utc.from_utc_datetime(&model.created_at),
        }
    }
}
