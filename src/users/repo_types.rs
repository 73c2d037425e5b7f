use sqlx::FromRow;
use time::OffsetDateTime;

/// Row of the `Users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: String,
    pub created_at: OffsetDateTime,
}
