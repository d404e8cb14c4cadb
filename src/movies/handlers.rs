use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::CurrentUser,
    error::{parse_id, ApiError, ApiResult},
    response::ApiResponse,
    state::AppState,
};

use super::dto::MovieRequest;
use super::repo::Movie;

pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list).post(create))
        .route(
            "/movies/:id",
            get(read).put(update).patch(patch_update).delete(delete_movie),
        )
}

#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<Movie>>>> {
    let movies = Movie::find_all(&state.db).await?;
    Ok(Json(ApiResponse::new("All movies are listed!", movies)))
}

#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<MovieRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Movie>>)> {
    let new_movie = payload.validate().map_err(ApiError::validation)?;

    let created = Movie::create(
        &state.db,
        user.id,
        &new_movie.title,
        new_movie.year,
        &new_movie.image_url,
    )
    .await?;

    info!(movie_id = %created.id, user_id = %user.id, "new movie created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("New movie is created!", created)),
    ))
}

#[instrument(skip(state, _user))]
pub async fn read(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Movie>>> {
    let id = parse_id(&id)?;
    let movie = Movie::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Movie not found!".into()))?;
    Ok(Json(ApiResponse::new("Your movie is here!", movie)))
}

#[instrument(skip(state, _user, payload))]
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MovieRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Movie>>)> {
    let id = parse_id(&id)?;
    let new_movie = payload.validate().map_err(ApiError::validation)?;

    Movie::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Movie not found!".into()))?;

    let modified = Movie::replace(
        &state.db,
        id,
        &new_movie.title,
        new_movie.year,
        &new_movie.image_url,
    )
    .await?;
    if modified == 0 {
        return Err(ApiError::ServerFault(
            "Something went wrong! Issue at last step!".into(),
        ));
    }

    let updated = reverify(&state, id).await?;
    info!(movie_id = %id, "movie updated");
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::new("Selected movie is updated!", updated)),
    ))
}

#[instrument(skip(state, _user, payload))]
pub async fn patch_update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MovieRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Movie>>)> {
    let id = parse_id(&id)?;
    let patch = payload.validate_patch().map_err(ApiError::validation)?;

    Movie::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Movie not found!".into()))?;

    let modified = Movie::apply_patch(
        &state.db,
        id,
        patch.title.as_deref(),
        patch.year,
        patch.image_url.as_deref(),
    )
    .await?;
    if modified == 0 {
        return Err(ApiError::ServerFault(
            "Something went wrong! Issue at last step!".into(),
        ));
    }

    let updated = reverify(&state, id).await?;
    info!(movie_id = %id, "movie patched");
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::new("Selected movie is updated!", updated)),
    ))
}

#[instrument(skip(state, _user))]
pub async fn delete_movie(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    Movie::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Movie not found!".into()))?;

    let deleted = Movie::delete_by_id(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::ServerFault(
            "Something went wrong! Issue at last step!".into(),
        ));
    }
    // Deletion postcondition: the row must actually be gone.
    if Movie::find_by_id(&state.db, id).await?.is_some() {
        return Err(ApiError::ServerFault(
            "Deleted movie still exists! Something went wrong!".into(),
        ));
    }

    info!(movie_id = %id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Mutation postcondition: re-fetch the row after an update; a vanished row
/// at this point is a server fault, not a 404.
async fn reverify(state: &AppState, id: Uuid) -> ApiResult<Movie> {
    Movie::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::ServerFault("Updated movie not found!".into()))
}
