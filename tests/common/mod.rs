#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use course_api::auth::{credentials, CredentialHasher, HashParams};
use course_api::database::models::{NewCourse, NewUser};
use course_api::database::{CourseStore, MemoryStore, UserStore};
use course_api::{router, AppState};

pub const REALM: &str = "courses";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub hasher: CredentialHasher,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn spawn_app() -> Result<TestApp> {
    // Keep Argon2 cheap so the suite stays fast
    let hasher = CredentialHasher::new(HashParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })?;
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), hasher.clone(), REALM)?;

    Ok(TestApp {
        router: router(state),
        store,
        hasher,
    })
}

pub fn basic(email: &str, password: &str) -> String {
    credentials::encode(email, password)
}

impl TestApp {
    pub async fn seed_user(&self, first_name: &str, email: &str, password: &str) -> Result<i32> {
        let user = self
            .store
            .create_user(NewUser {
                first_name: first_name.to_string(),
                last_name: "Tester".to_string(),
                email: email.to_string(),
                password_hash: self.hasher.hash(password)?.into_string(),
            })
            .await?;
        Ok(user.id)
    }

    pub async fn seed_course(&self, owner: i32, title: &str) -> Result<i32> {
        let course = self
            .store
            .create_course(NewCourse {
                title: title.to_string(),
                description: format!("All about {}", title),
                estimated_time: Some("2 hours".to_string()),
                materials_needed: None,
                user_id: owner,
            })
            .await?;
        Ok(course.id)
    }

    pub async fn course_title(&self, id: i32) -> Result<Option<String>> {
        Ok(self.store.find_course_by_id(id).await?.map(|c| c.title))
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(TestResponse { status, headers, body })
    }

    pub async fn get(&self, uri: &str, authorization: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, uri, authorization, None).await
    }
}
