use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::{Authenticator, CredentialHasher, HashError};
use crate::database::{CourseStore, UserStore};
use crate::handlers::{protected, public};
use crate::middleware::basic_auth_middleware;

/// Everything a request needs, built once at startup and shared by handle.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub courses: Arc<dyn CourseStore>,
    pub authenticator: Authenticator,
    pub hasher: CredentialHasher,
    pub auth_realm: Arc<str>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, hasher: CredentialHasher, auth_realm: &str) -> Result<Self, HashError>
    where
        S: UserStore + CourseStore + 'static,
    {
        let users: Arc<dyn UserStore> = store.clone();
        let courses: Arc<dyn CourseStore> = store;
        let authenticator = Authenticator::new(users.clone(), hasher.clone())?;

        Ok(Self {
            users,
            courses,
            authenticator,
            hasher,
            auth_realm: Arc::from(auth_realm),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(public_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/api/users", post(public::user_post))
        .route("/api/courses", get(public::courses_get))
        .route("/api/courses/:id", get(public::course_get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/api/users", get(protected::users_get))
        .route("/api/courses", post(protected::course_post))
        .route(
            "/api/courses/:id",
            put(protected::course_put).delete(protected::course_delete),
        )
        .route_layer(from_fn_with_state(state, basic_auth_middleware))
}
