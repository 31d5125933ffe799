//! Admin-only access

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::Actor;

use super::user_auth::RequireUser;

/// Extractor that requires an authenticated user with the admin role
///
/// Missing or invalid tokens give 401; valid tokens without the role give 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Actor);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(actor) = RequireUser::from_request_parts(parts, state).await?;

        if !actor.is_admin() {
            warn!(user_id = %actor.user_id, path = %parts.uri.path(), "Admin access denied");
            return Err(ApiError::forbidden("Admin access required"));
        }

        Ok(RequireAdmin(actor))
    }
}
