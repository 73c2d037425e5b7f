use crate::error::ApiError;

pub const MIN_USER_ID_LEN: usize = 3;

/// Trims the submitted id and enforces the minimum length.
pub fn normalize_user_id(raw: Option<&str>) -> Result<&str, ApiError> {
    raw.map(str::trim)
        .filter(|id| id.chars().count() >= MIN_USER_ID_LEN)
        .ok_or_else(|| {
            ApiError::bad_request("Valid User ID is required (minimum 3 characters)")
        })
}
