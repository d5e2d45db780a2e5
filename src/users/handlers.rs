use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::AppError,
    state::AppState,
    users::{
        dto::{CreateUserBody, EmailQuery},
        repo::User,
    },
    validate::is_valid_email,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/by-email", get(get_user_by_email))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if payload.name.is_empty() {
        warn!("empty name");
        return Err(AppError::Validation("Name is required".into()));
    }

    let user = User::create(&state.db, &payload.email, &payload.name).await?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Lookup is exact and case-sensitive; a miss is a `null` body, not an error.
#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(q): Query<EmailQuery>,
) -> Result<Json<Option<User>>, AppError> {
    if !is_valid_email(&q.email) {
        warn!(email = %q.email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }

    let user = User::find_by_email(&state.db, &q.email).await?;
    Ok(Json(user))
}
