use crate::app::AppState;
use crate::auth::{authorize, Decision, Principal};
use crate::database::models::Course;
use crate::error::ApiError;
use crate::types::Operation;

/// Fetch a course for mutation by `principal`.
///
/// Existence is checked first (404), ownership second (403).
pub(super) async fn load_owned_course(
    state: &AppState,
    principal: &Principal,
    id: i32,
    operation: Operation,
) -> Result<Course, ApiError> {
    let course = state
        .courses
        .find_course_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    match authorize(principal, course.user_id) {
        Decision::Permit => Ok(course),
        Decision::Deny(reason) => {
            tracing::warn!(
                "User {} denied {} on course {} owned by user {}",
                principal.id,
                operation,
                course.id,
                course.user_id
            );
            Err(ApiError::forbidden(reason))
        }
    }
}
