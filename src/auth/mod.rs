// auth/mod.rs - Per-request Basic authentication and owner-only authorization
//
// Every protected request carries `Authorization: Basic base64(email:password)`.
// Nothing is remembered between requests: each one is looked up and verified
// from scratch, then mutations are checked against the resource owner.

pub mod authenticator;
pub mod credentials;
pub mod hasher;
pub mod ownership;

pub use authenticator::{AuthError, AuthFailure, Authenticator, Principal};
pub use credentials::{extract, Credentials, MalformedCredentials};
pub use hasher::{CredentialHasher, HashError, HashParams, HashedSecret};
pub use ownership::{authorize, Decision};
