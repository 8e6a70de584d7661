// handlers/public/users.rs - POST /api/users (account creation)

use std::collections::BTreeMap;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::NewUser;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

use super::required;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/users - create an account
///
/// Only presence is checked. The password is hashed before it reaches the store
/// and is never echoed back or logged.
pub async fn user_post(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;

    let mut field_errors = BTreeMap::new();
    let first_name = required(payload.first_name, "firstName", "A first name is required", &mut field_errors);
    let last_name = required(payload.last_name, "lastName", "A last name is required", &mut field_errors);
    let email = required(payload.email, "email", "An email is required", &mut field_errors);
    let password = payload.password.filter(|p| !p.is_empty());
    if password.is_none() {
        field_errors.insert("password".to_string(), "A password is required".to_string());
    }

    let (Some(first_name), Some(last_name), Some(email), Some(password)) =
        (first_name, last_name, email, password)
    else {
        return Err(ApiError::validation_error("Missing required fields", field_errors));
    };

    let password_hash = state.hasher.hash_blocking(password).await?;

    let user = state
        .users
        .create_user(NewUser {
            first_name,
            last_name,
            email,
            password_hash: password_hash.into_string(),
        })
        .await
        .map_err(|err| match err {
            DatabaseError::Conflict(_) => {
                let mut field_errors = BTreeMap::new();
                field_errors.insert(
                    "email".to_string(),
                    "The email you entered already exists".to_string(),
                );
                ApiError::validation_error("The email you entered already exists", field_errors)
            }
            other => other.into(),
        })?;

    tracing::info!("Created user {} ({})", user.id, user.email);

    Ok(ApiResponse::created(
        json!({ "message": "Account successfully created!" }),
        "/",
    ))
}
