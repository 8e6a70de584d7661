use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::error::ApiError;

/// Basic authentication middleware for protected routes.
///
/// Verifies the `Authorization` header on every request and injects the
/// resolved [`Principal`](crate::auth::Principal) into request extensions.
/// On any rejection the wrapped handler is never called.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header that is not visible ASCII is treated like any other unparseable one
    let header_value = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default().to_owned());

    let principal = state
        .authenticator
        .authenticate(header_value.as_deref())
        .await
        .map_err(|err| ApiError::from_auth(err, &state.auth_realm))?;

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
