use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Row of the `Output` table: one logged meal.
#[derive(Debug, Clone, FromRow)]
pub struct MealRecord {
    pub id: Uuid,
    pub user_id: String,
    pub meal: String,
    pub meal_type: Option<String>,
    pub calories: Option<i32>,
    pub created_at: OffsetDateTime,
}

/// Values needed to log a meal; `id` and `created_at` are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewMeal<'a> {
    pub user_id: &'a str,
    pub meal: &'a str,
    pub meal_type: &'a str,
    pub calories: i32,
}
