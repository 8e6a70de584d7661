// handlers/protected/mod.rs - Protected handlers (Basic authentication required)
//
// Every route here sits behind `basic_auth_middleware`, so each handler can
// take the resolved `Principal` from request extensions. Course mutations are
// additionally restricted to the course owner.

pub mod courses;
pub mod users;
mod utils;

pub use courses::{course_delete, course_post, course_put};
pub use users::users_get;
