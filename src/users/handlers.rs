use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{extractors::CurrentUser, password},
    error::{parse_id, ApiError, ApiResult},
    response::ApiResponse,
    state::AppState,
};

use super::dto::CreateUserRequest;
use super::repo::User;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/:id", get(read).delete(delete_user))
}

#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    let users = User::find_all(&state.db).await?;
    Ok(Json(ApiResponse::new("All users are listed!", users)))
}

#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let new_user = payload.validate().map_err(ApiError::validation)?;
    let hash = password::hash_password(&new_user.password, &state.config.secret_key);

    let created = match User::create(&state.db, &new_user.username, &new_user.email, &hash).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err))
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            warn!(username = %new_user.username, "username or email already taken");
            return Err(ApiError::BadRequest(
                "Username and email must be unique!".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %created.id, username = %created.username, "new user created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("New user is created!", created)),
    ))
}

#[instrument(skip(state, _user))]
pub async fn read(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let id = parse_id(&id)?;
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found!".into()))?;
    Ok(Json(ApiResponse::new("Your user is here!", user)))
}

#[instrument(skip(state, _user))]
pub async fn delete_user(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found!".into()))?;

    let deleted = User::delete_by_id(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::ServerFault(
            "Something went wrong! Issue at last step!".into(),
        ));
    }
    // Deletion postcondition: the row must actually be gone.
    if User::find_by_id(&state.db, id).await?.is_some() {
        return Err(ApiError::ServerFault(
            "Deleted user still exists! Something went wrong!".into(),
        ));
    }

    info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
