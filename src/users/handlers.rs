use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, MessageBody},
    state::AppState,
    users::{
        dto::{DeleteAllResponse, UpdateUserRequest, UserView},
        repo_types::UserId,
        services::changes_for,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).delete(delete_all_users))
        .route("/users/:id", put(update_user).delete(delete_user))
}

/// A malformed id cannot name a stored user, so it is reported as not found.
fn parse_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse().map_err(|_| {
        warn!(id = %raw, "malformed user id");
        ApiError::NotFound
    })
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(request) = payload.map_err(|e| match e {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::BadRequest("Invalid request, expected JSON".into())
        }
        other => ApiError::BadRequest(other.body_text()),
    })?;

    let id = parse_id(&id)?;
    let existing = state.users.find_by_id(id).await?.ok_or_else(|| {
        warn!(%id, "update of unknown user");
        ApiError::NotFound
    })?;

    let changes = changes_for(request, &existing, &state.countries).map_err(|e| {
        warn!(%id, error = %e, "update rejected");
        ApiError::from(e)
    })?;

    if !state.users.update(id, changes).await? {
        return Err(ApiError::NotFound);
    }

    info!(%id, "user updated");
    Ok(Json(MessageBody::new("User updated successfully")))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

#[instrument(skip(state))]
pub async fn delete_all_users(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let count = state.users.delete_all().await?;
    info!(count, "all users deleted");
    Ok(Json(DeleteAllResponse {
        message: format!("Deleted {} users", count),
        count,
    }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = parse_id(&id)?;
    if !state.users.delete(id).await? {
        warn!(%id, "delete of unknown user");
        return Err(ApiError::NotFound);
    }
    info!(%id, "user deleted");
    Ok(Json(MessageBody::new("User deleted successfully")))
}
