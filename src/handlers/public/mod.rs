// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account creation, course reads, and service status.

use std::collections::BTreeMap;

use crate::error::ApiError;

pub mod courses;
pub mod system;
pub mod users;

pub use courses::{course_get, courses_get};
pub use system::{health, root};
pub use users::user_post;

/// Course ids are integers; anything else names no course.
pub(crate) fn parse_course_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::not_found("Course not found"))
}

/// Presence check for a required text field. Blank counts as absent.
pub(crate) fn required(
    value: Option<String>,
    field: &str,
    message: &str,
    field_errors: &mut BTreeMap<String, String>,
) -> Option<String> {
    let value = value.filter(|v| !v.trim().is_empty());
    if value.is_none() {
        field_errors.insert(field.to_string(), message.to_string());
    }
    value
}
