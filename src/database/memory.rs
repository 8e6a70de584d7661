use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Course, CourseChanges, CourseDetail, NewCourse, NewUser, UserRecord, UserSummary,
};
use crate::database::repository::{CourseStore, UserStore};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, UserRecord>,
    courses: BTreeMap<i32, Course>,
    last_user_id: i32,
    last_course_id: i32,
}

impl Tables {
    fn detail(&self, course: &Course) -> Option<CourseDetail> {
        let owner = self.users.get(&course.user_id)?;
        Some(CourseDetail {
            course: course.clone(),
            owner: UserSummary::from(owner),
        })
    }
}

/// In-process store with the same constraints as the relational schema:
/// unique email, and every course must reference an existing user.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict(format!("email '{}' already exists", user.email)));
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let record = UserRecord {
            id: tables.last_user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_courses(&self) -> Result<Vec<CourseDetail>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.courses.values().filter_map(|c| tables.detail(c)).collect())
    }

    async fn find_course_by_id(&self, id: i32) -> Result<Option<Course>, DatabaseError> {
        Ok(self.tables.read().await.courses.get(&id).cloned())
    }

    async fn find_course_detail(&self, id: i32) -> Result<Option<CourseDetail>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.courses.get(&id).and_then(|c| tables.detail(c)))
    }

    async fn create_course(&self, course: NewCourse) -> Result<Course, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&course.user_id) {
            return Err(DatabaseError::InvalidReference(format!(
                "user {} does not exist",
                course.user_id
            )));
        }

        tables.last_course_id += 1;
        let now = Utc::now();
        let record = Course {
            id: tables.last_course_id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            user_id: course.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.courses.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_course(&self, id: i32, changes: CourseChanges) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(course) = tables.courses.get_mut(&id) else {
            return Ok(false);
        };

        course.title = changes.title;
        course.description = changes.description;
        course.estimated_time = changes.estimated_time;
        course.materials_needed = changes.materials_needed;
        course.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_course(&self, id: i32) -> Result<bool, DatabaseError> {
        Ok(self.tables.write().await.courses.remove(&id).is_some())
    }
}
