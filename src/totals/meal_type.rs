use serde::Serialize;

/// Meal category used for sub-aggregating daily totals.
///
/// Anything that is not breakfast, lunch or dinner collapses into `Unknown`,
/// which still counts toward the day total but owns no bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Unknown,
}

impl MealType {
    /// Case-insensitive, whitespace-tolerant normalization.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            _ => MealType::Unknown,
        }
    }
}

impl From<Option<&str>> for MealType {
    fn from(raw: Option<&str>) -> Self {
        raw.map(MealType::normalize).unwrap_or(MealType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_known_types_regardless_of_case() {
        assert_eq!(MealType::normalize("breakfast"), MealType::Breakfast);
        assert_eq!(MealType::normalize("LUNCH"), MealType::Lunch);
        assert_eq!(MealType::normalize(" Dinner "), MealType::Dinner);
    }

    #[test]
    fn unrecognized_and_missing_types_are_unknown() {
        assert_eq!(MealType::normalize("snack"), MealType::Unknown);
        assert_eq!(MealType::normalize(""), MealType::Unknown);
        assert_eq!(MealType::from(None), MealType::Unknown);
    }
}
