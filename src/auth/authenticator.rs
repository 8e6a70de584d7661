use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::credentials;
use super::hasher::{CredentialHasher, HashError, HashedSecret};
use crate::database::models::UserRecord;
use crate::database::{DatabaseError, UserStore};

/// The authenticated identity for one request. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&UserRecord> for Principal {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Why a request was not authenticated.
///
/// The kinds are kept apart for logs and tests only; at the HTTP boundary
/// they all become the same 401.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("no credentials supplied")]
    Missing,

    #[error("credentials could not be parsed")]
    Malformed,

    #[error("no user with that identifier")]
    UserNotFound,

    #[error("secret does not match")]
    WrongSecret,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Rejected(#[from] AuthFailure),

    /// The user lookup itself failed; nothing can be said about the credentials.
    #[error("user lookup failed: {0}")]
    Store(#[from] DatabaseError),
}

const DECOY_SECRET: &str = "decoy secret for unknown identifiers";

/// Resolves the `Authorization` header of a request to a [`Principal`].
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    decoy: HashedSecret,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>, hasher: CredentialHasher) -> Result<Self, HashError> {
        // Unknown identifiers are verified against this, so both rejection paths cost one hash.
        let decoy = hasher.hash(DECOY_SECRET)?;
        Ok(Self { users, hasher, decoy })
    }

    pub async fn authenticate(&self, header_value: Option<&str>) -> Result<Principal, AuthError> {
        let header_value = header_value.ok_or(AuthFailure::Missing)?;
        let creds = credentials::extract(header_value).map_err(|_| AuthFailure::Malformed)?;

        let user = self.users.find_user_by_email(&creds.identifier).await?;

        let stored = match &user {
            Some(user) => HashedSecret::from_stored(user.password_hash.clone()),
            None => self.decoy.clone(),
        };
        let verified = self.hasher.verify_blocking(creds.secret, stored).await;

        match user {
            None => {
                tracing::warn!("Authentication failed for '{}': unknown identifier", creds.identifier);
                Err(AuthFailure::UserNotFound.into())
            }
            Some(_) if !verified => {
                tracing::warn!("Authentication failed for '{}': wrong secret", creds.identifier);
                Err(AuthFailure::WrongSecret.into())
            }
            Some(user) => {
                tracing::debug!("Authenticated user {} ({})", user.id, user.email);
                Ok(Principal::from(&user))
            }
        }
    }
}
