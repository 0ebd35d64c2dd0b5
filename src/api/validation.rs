use super::ApiError;

pub const DEFAULT_PAGE_LIMIT: u64 = 50;
pub const MAX_PAGE_LIMIT: u64 = 200;
pub const DEFAULT_TOP_AUTHORS: u64 = 4;

pub fn validate_story_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid story ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_author_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid author ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between 1 and {}",
            limit, MAX_PAGE_LIMIT
        )));
    }
    Ok(limit)
}

pub fn validate_role(role: &str) -> Result<&str, ApiError> {
    if role != "user" && role != "admin" {
        return Err(ApiError::validation(format!(
            "Invalid role: '{}'. Role must be 'user' or 'admin'",
            role
        )));
    }
    Ok(role)
}

/// Top-N parameter comes in as free text; anything unusable falls back to
/// the default.
#[must_use]
pub fn parse_top_limit(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .filter(|n| *n > 0)
        .map_or(DEFAULT_TOP_AUTHORS, |n| n.min(MAX_PAGE_LIMIT))
}

/// Treats absent and blank strings the same way the original API did.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
