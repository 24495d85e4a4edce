//! Session-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lookbook_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires a
/// signed-in user:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user = %user.email, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// A structurally valid token whose address is not on the allow-list is
/// rejected with 403: the OAuth provider vouches for the address, the
/// allow-list decides whether it belongs here.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The signed-in user's e-mail address (from `claims.sub`).
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if !state.allow_list.contains(&claims.sub) {
            tracing::warn!(email = %claims.sub, "Rejected session for address outside the allow-list");
            return Err(AppError::Core(CoreError::Forbidden(
                "This account is not authorized to use the app".into(),
            )));
        }

        Ok(AuthUser { email: claims.sub })
    }
}
