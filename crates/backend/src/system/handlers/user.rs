use axum::extract::{Json, State};
use chrono::Utc;
use contracts::system::auth::LoginRequest;

use crate::state::AppState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{jwt, AuthError};
use crate::system::users::service as user_service;

/// Login handler. Responds with the bare token string.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<String, AuthError> {
    let user =
        user_service::verify_credentials(state.users.as_ref(), &request.username, &request.password)
            .await
            .map_err(AuthError::UserStore)?;

    let Some(user) = user else {
        tracing::info!(username = %request.username, "Login failed");
        return Err(AuthError::InvalidCredentials {
            legacy_status: state.config.auth.legacy_not_found_status,
        });
    };

    let token = jwt::generate_access_token(&state.keys, &user, Utc::now())?;
    tracing::info!(username = %user.username, role = %user.role, "Issued access token");

    Ok(token)
}

/// Admin handler (protected by middleware)
pub async fn admin(CurrentUser(identity): CurrentUser) -> String {
    format!(
        "Current Logged in user {} with role of an {}",
        identity.full_name, identity.role
    )
}
