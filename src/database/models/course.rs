use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::user::UserSummary;

/// Row from the `courses` table. `user_id` is the owner and is never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i32,
}

/// Replacement content for an existing course. The owner is not part of it.
#[derive(Debug, Clone)]
pub struct CourseChanges {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// A course together with its owner's public fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub owner: UserSummary,
}

/// Flat row for `courses JOIN users`.
#[derive(Debug, FromRow)]
pub(crate) struct CourseDetailRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email: String,
}

impl From<CourseDetailRow> for CourseDetail {
    fn from(row: CourseDetailRow) -> Self {
        Self {
            owner: UserSummary {
                id: row.user_id,
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
                email: row.owner_email,
            },
            course: Course {
                id: row.id,
                title: row.title,
                description: row.description,
                estimated_time: row.estimated_time,
                materials_needed: row.materials_needed,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}
