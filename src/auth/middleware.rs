use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{auth::session, errors::AppError};

/// Authentication state that gets injected into protected route handlers
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Session gate: lets the request through only when the signed session cookie
/// names a user, otherwise redirects to the login page.
pub async fn require_auth(
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session::current_user(&jar) {
        Some(username) => {
            request.extensions_mut().insert(AuthUser { username });
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "no session, redirecting to login");
            Err(AppError::Unauthenticated)
        }
    }
}
