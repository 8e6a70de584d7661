// handlers/protected/courses.rs - POST, PUT and DELETE on /api/courses

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::auth::Principal;
use crate::database::models::{Course, CourseChanges, NewCourse};
use crate::error::ApiError;
use crate::handlers::public::{parse_course_id, required};
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Operation;

use super::utils::load_owned_course;

/// Body for both create and update. An owner id in the body is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl CoursePayload {
    fn into_changes(self) -> Result<CourseChanges, ApiError> {
        let mut field_errors = BTreeMap::new();
        let title = required(self.title, "title", "A title is required", &mut field_errors);
        let description = required(
            self.description,
            "description",
            "A description is required",
            &mut field_errors,
        );

        match (title, description) {
            (Some(title), Some(description)) => Ok(CourseChanges {
                title,
                description,
                estimated_time: self.estimated_time,
                materials_needed: self.materials_needed,
            }),
            _ => Err(ApiError::validation_error("Missing required fields", field_errors)),
        }
    }
}

/// POST /api/courses - create a course owned by the caller
pub async fn course_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<CoursePayload>, JsonRejection>,
) -> ApiResult<Course> {
    let Json(payload) = payload?;
    let changes = payload.into_changes()?;

    let course = state
        .courses
        .create_course(NewCourse {
            title: changes.title,
            description: changes.description,
            estimated_time: changes.estimated_time,
            materials_needed: changes.materials_needed,
            user_id: principal.id,
        })
        .await?;

    tracing::info!("User {} created course {}", principal.id, course.id);

    let location = format!("/api/courses/{}", course.id);
    Ok(ApiResponse::created(course, location))
}

/// PUT /api/courses/:id - replace a course's content (owner only)
pub async fn course_put(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    payload: Result<Json<CoursePayload>, JsonRejection>,
) -> ApiResult<()> {
    let id = parse_course_id(&id)?;
    let course = load_owned_course(&state, &principal, id, Operation::Update).await?;

    let Json(payload) = payload?;
    let changes = payload.into_changes()?;

    if !state.courses.update_course(course.id, changes).await? {
        return Err(ApiError::not_found("Course not found"));
    }

    tracing::info!("User {} updated course {}", principal.id, course.id);
    Ok(ApiResponse::<()>::no_content())
}

/// DELETE /api/courses/:id - remove a course (owner only)
pub async fn course_delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_course_id(&id)?;
    let course = load_owned_course(&state, &principal, id, Operation::Delete).await?;

    if !state.courses.delete_course(course.id).await? {
        return Err(ApiError::not_found("Course not found"));
    }

    tracing::info!("User {} deleted course {}", principal.id, course.id);
    Ok(ApiResponse::<()>::no_content())
}
