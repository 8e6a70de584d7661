pub mod course;
pub mod user;

pub use course::{Course, CourseChanges, CourseDetail, NewCourse};
pub use user::{NewUser, UserRecord, UserSummary};
