// handlers/public/courses.rs - GET /api/courses and GET /api/courses/:id
//
// Reads are not owner-restricted and need no credentials.

use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::models::CourseDetail;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

use super::parse_course_id;

/// GET /api/courses - every course with its owner
pub async fn courses_get(State(state): State<AppState>) -> ApiResult<Vec<CourseDetail>> {
    let courses = state.courses.list_courses().await?;
    Ok(ApiResponse::success(courses))
}

/// GET /api/courses/:id - one course with its owner
pub async fn course_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CourseDetail> {
    let id = parse_course_id(&id)?;

    let course = state
        .courses
        .find_course_detail(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    Ok(ApiResponse::success(course))
}
