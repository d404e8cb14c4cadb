use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, SessionUser},
        extractors::CurrentUser,
        password,
        session::{self, SessionData},
    },
    error::{ApiError, ApiResult},
    response::ApiResponse,
    state::AppState,
    users::repo::User,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

fn missing_credentials() -> ApiError {
    ApiError::BadRequest("Email or username and a Password fields are required!".into())
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<(SignedCookieJar, Json<ApiResponse<SessionUser>>)> {
    let username = payload.username.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let email = payload.email.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let password = payload.password.as_deref().filter(|v| !v.is_empty());

    let Some(password) = password else {
        return Err(missing_credentials());
    };

    // Username wins when both identifiers are supplied.
    let user = match (username, email) {
        (Some(username), _) => User::find_by_username(&state.db, username).await?,
        (None, Some(email)) => User::find_by_email(&state.db, email).await?,
        (None, None) => return Err(missing_credentials()),
    };

    let Some(user) = user else {
        warn!("login attempt for unknown user");
        return Err(ApiError::Unauthorized("Unauthorized! - User not found!".into()));
    };

    if user.password_hash != password::hash_password(password, &state.config.secret_key) {
        warn!(user_id = %user.id, "login attempt with invalid password");
        return Err(ApiError::Unauthorized("Unauthorized! - Invalid password!".into()));
    }

    let jar = SessionData::new(user.id, &user.password_hash).write(jar);

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok((
        jar,
        Json(ApiResponse::new(
            "Logged in successfully!",
            SessionUser {
                user_id: user.id,
                username: user.username,
            },
        )),
    ))
}

#[instrument(skip_all)]
pub async fn logout(
    CurrentUser(user): CurrentUser,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<ApiResponse<()>>) {
    info!(user_id = %user.id, "user logged out");
    (
        session::clear(jar),
        Json(ApiResponse::message_only("Logout successful!")),
    )
}
