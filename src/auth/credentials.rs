//! Basic credential parsing for the `Authorization` header.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

pub const BASIC_SCHEME: &str = "Basic";

/// Any reason the header could not be read as `Basic base64(identifier:secret)`.
///
/// Deliberately carries no detail: callers only ever need to know that the
/// header was unusable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("malformed credentials")]
pub struct MalformedCredentials;

/// The (identifier, secret) pair presented by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Parse `Basic <base64(identifier:secret)>`.
///
/// Only the first colon splits, so secrets may contain colons.
pub fn extract(header_value: &str) -> Result<Credentials, MalformedCredentials> {
    let (scheme, payload) = header_value.split_once(' ').ok_or(MalformedCredentials)?;
    if scheme != BASIC_SCHEME || payload.is_empty() {
        return Err(MalformedCredentials);
    }

    let decoded = STANDARD.decode(payload).map_err(|_| MalformedCredentials)?;
    let decoded = String::from_utf8(decoded).map_err(|_| MalformedCredentials)?;

    let (identifier, secret) = decoded.split_once(':').ok_or(MalformedCredentials)?;

    Ok(Credentials {
        identifier: identifier.to_string(),
        secret: secret.to_string(),
    })
}

/// Build the header value for a credential pair.
pub fn encode(identifier: &str, secret: &str) -> String {
    format!("{} {}", BASIC_SCHEME, STANDARD.encode(format!("{}:{}", identifier, secret)))
}
