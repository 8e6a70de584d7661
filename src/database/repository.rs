use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::course::CourseDetailRow;
use crate::database::models::{Course, CourseChanges, CourseDetail, NewCourse, NewUser, UserRecord};

/// User lookups and account creation.
///
/// Authentication only ever calls `find_user_by_email`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive match on the unique email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError>;

    /// Fails with `DatabaseError::Conflict` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<CourseDetail>, DatabaseError>;

    async fn find_course_by_id(&self, id: i32) -> Result<Option<Course>, DatabaseError>;

    async fn find_course_detail(&self, id: i32) -> Result<Option<CourseDetail>, DatabaseError>;

    /// Fails with `DatabaseError::InvalidReference` when the owner does not exist.
    async fn create_course(&self, course: NewCourse) -> Result<Course, DatabaseError>;

    /// Returns false when no course has this id.
    async fn update_course(&self, id: i32, changes: CourseChanges) -> Result<bool, DatabaseError>;

    /// Returns false when no course has this id.
    async fn delete_course(&self, id: i32) -> Result<bool, DatabaseError>;
}

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, created_at, updated_at";

const COURSE_COLUMNS: &str =
    "id, title, description, estimated_time, materials_needed, user_id, created_at, updated_at";

const COURSE_DETAIL_SELECT: &str = r#"
    SELECT
        c.id, c.title, c.description, c.estimated_time, c.materials_needed,
        c.user_id, c.created_at, c.updated_at,
        u.first_name AS owner_first_name,
        u.last_name AS owner_last_name,
        u.email AS owner_email
    FROM courses c
    JOIN users u ON u.id = c.user_id
"#;

/// Postgres-backed store over the `users` and `courses` tables.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, DatabaseError> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (first_name, last_name, email, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, NOW(), NOW())
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::classify)?;

        Ok(record)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn list_courses(&self) -> Result<Vec<CourseDetail>, DatabaseError> {
        let rows = sqlx::query_as::<_, CourseDetailRow>(&format!("{} ORDER BY c.id", COURSE_DETAIL_SELECT))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CourseDetail::from).collect())
    }

    async fn find_course_by_id(&self, id: i32) -> Result<Option<Course>, DatabaseError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE id = $1",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    async fn find_course_detail(&self, id: i32) -> Result<Option<CourseDetail>, DatabaseError> {
        let row = sqlx::query_as::<_, CourseDetailRow>(&format!("{} WHERE c.id = $1", COURSE_DETAIL_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CourseDetail::from))
    }

    async fn create_course(&self, course: NewCourse) -> Result<Course, DatabaseError> {
        let record = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses
                (title, description, estimated_time, materials_needed, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
             RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.estimated_time)
        .bind(&course.materials_needed)
        .bind(course.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::classify)?;

        Ok(record)
    }

    async fn update_course(&self, id: i32, changes: CourseChanges) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE courses
             SET title = $2, description = $3, estimated_time = $4, materials_needed = $5, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.estimated_time)
        .bind(&changes.materials_needed)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_course(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
