use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{MealRecord, NewMeal};

const COLUMNS: &str = r#"id, userid AS user_id, "Meal" AS meal, "Type of Meal" AS meal_type,
       "Calories" AS calories, created_at"#;

pub async fn insert(db: &PgPool, new: &NewMeal<'_>) -> anyhow::Result<MealRecord> {
    let sql = format!(
        r#"
        INSERT INTO "Output" (id, userid, "Meal", "Type of Meal", "Calories")
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, MealRecord>(&sql)
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.meal)
        .bind(new.meal_type)
        .bind(new.calories)
        .fetch_one(db)
        .await
        .context("insert meal")?;
    Ok(row)
}

/// Meals of a user, newest first, optionally bounded (inclusive) on both ends.
pub async fn list_by_user(
    db: &PgPool,
    user_id: &str,
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
) -> anyhow::Result<Vec<MealRecord>> {
    let sql = format!(
        r#"
        SELECT {COLUMNS}
        FROM "Output"
        WHERE userid = $1
          AND ($2::timestamptz IS NULL OR created_at >= $2)
          AND ($3::timestamptz IS NULL OR created_at <= $3)
        ORDER BY created_at DESC
        "#
    );
    let rows = sqlx::query_as::<_, MealRecord>(&sql)
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
        .context("list meals by user")?;
    Ok(rows)
}

/// Meals of a user logged at or after `start`, oldest first.
pub async fn list_since(
    db: &PgPool,
    user_id: &str,
    start: OffsetDateTime,
) -> anyhow::Result<Vec<MealRecord>> {
    let sql = format!(
        r#"
        SELECT {COLUMNS}
        FROM "Output"
        WHERE userid = $1 AND created_at >= $2
        ORDER BY created_at ASC
        "#
    );
    let rows = sqlx::query_as::<_, MealRecord>(&sql)
        .bind(user_id)
        .bind(start)
        .fetch_all(db)
        .await
        .context("list meals since")?;
    Ok(rows)
}
