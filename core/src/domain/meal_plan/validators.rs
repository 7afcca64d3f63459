use chrono::NaiveDate;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::entities::{FamilyMember, HouseholdType},
};

/// A week start must be a calendar date in `YYYY-MM-DD` form.
pub fn parse_week_start(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::InvalidInput(format!(
            "weekStart must be an ISO date (YYYY-MM-DD), got '{}'",
            value
        ))
    })
}

/// More than one member makes a family; an empty list is a household of one.
pub fn infer_household(members: &[FamilyMember]) -> (HouseholdType, u32) {
    let size = u32::try_from(members.len()).unwrap_or(u32::MAX).max(1);
    let household_type = if members.len() > 1 {
        HouseholdType::Family
    } else {
        HouseholdType::Single
    };

    (household_type, size)
}

pub fn ensure_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meal_plan::entities::Dosha;

    fn member(name: &str) -> FamilyMember {
        FamilyMember {
            name: name.to_string(),
            dosha: Dosha::Vata,
        }
    }

    #[test]
    fn test_parse_week_start() {
        assert_eq!(
            parse_week_start("2025-09-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
        );
        assert!(matches!(
            parse_week_start("01/09/2025"),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(parse_week_start("2025-02-30").is_err());
    }

    #[test]
    fn test_infer_household() {
        assert_eq!(infer_household(&[]), (HouseholdType::Single, 1));
        assert_eq!(infer_household(&[member("Asha")]), (HouseholdType::Single, 1));
        assert_eq!(
            infer_household(&[member("Asha"), member("Ravi"), member("Meera")]),
            (HouseholdType::Family, 3)
        );
    }

    #[test]
    fn test_ensure_non_empty() {
        assert!(ensure_non_empty("region", "Kerala").is_ok());
        assert!(matches!(
            ensure_non_empty("region", "   "),
            Err(CoreError::InvalidInput(message)) if message == "region is required"
        ));
    }
}
