use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::AppError,
    headshots::{
        dto::{CreateHeadshotBody, HeadshotWithUser, UpdateHeadshotBody},
        repo::HeadshotRequest,
    },
    state::AppState,
    validate::is_valid_url,
};

pub fn headshot_routes() -> Router<AppState> {
    Router::new()
        .route("/headshots", post(create_headshot).get(list_all_headshots))
        .route("/headshots/pending", get(list_pending_headshots))
        .route("/headshots/:id", get(get_headshot).patch(update_headshot))
        .route("/users/:user_id/headshots", get(list_user_headshots))
}

#[instrument(skip(state, payload))]
pub async fn create_headshot(
    State(state): State<AppState>,
    Json(payload): Json<CreateHeadshotBody>,
) -> Result<(StatusCode, HeaderMap, Json<HeadshotRequest>), AppError> {
    if !is_valid_url(&payload.original_image_url) {
        warn!(url = %payload.original_image_url, "invalid original_image_url");
        return Err(AppError::Validation("Invalid original_image_url".into()));
    }

    let headshot = HeadshotRequest::create(
        &state.db,
        payload.user_id,
        &payload.original_image_url,
        payload.background_style,
        payload.attire,
        payload.expression,
    )
    .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/v1/headshots/{}", headshot.id).parse().unwrap(),
    );

    info!(headshot_id = %headshot.id, user_id = %headshot.user_id, "headshot request created");
    Ok((StatusCode::CREATED, headers, Json(headshot)))
}

/// A miss is a `null` body, not an error.
#[instrument(skip(state))]
pub async fn get_headshot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<HeadshotWithUser>>, AppError> {
    let row = HeadshotRequest::find_by_id_with_user(&state.db, id).await?;
    Ok(Json(row.map(HeadshotWithUser::from)))
}

#[instrument(skip(state))]
pub async fn list_user_headshots(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<HeadshotWithUser>>, AppError> {
    let rows = HeadshotRequest::list_by_user(&state.db, user_id).await?;
    Ok(Json(rows.into_iter().map(HeadshotWithUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn list_all_headshots(
    State(state): State<AppState>,
) -> Result<Json<Vec<HeadshotWithUser>>, AppError> {
    let rows = HeadshotRequest::list_all(&state.db).await?;
    Ok(Json(rows.into_iter().map(HeadshotWithUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn list_pending_headshots(
    State(state): State<AppState>,
) -> Result<Json<Vec<HeadshotRequest>>, AppError> {
    let rows = HeadshotRequest::list_pending(&state.db).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn update_headshot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateHeadshotBody>,
) -> Result<Json<HeadshotRequest>, AppError> {
    if let Some(Some(url)) = &payload.generated_image_url {
        if !is_valid_url(url) {
            warn!(url = %url, "invalid generated_image_url");
            return Err(AppError::Validation("Invalid generated_image_url".into()));
        }
    }

    let status = payload.status;
    let headshot = HeadshotRequest::update(&state.db, id, &payload.into()).await?;

    if let Some(status) = status {
        info!(headshot_id = %headshot.id, status = ?status, "headshot status updated");
    }
    Ok(Json(headshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headshots::repo::{Attire, BackgroundStyle, Expression};

    // AppState::fake() holds a lazy pool, so these prove validation fires
    // before the store is touched.

    #[tokio::test]
    async fn create_headshot_rejects_invalid_url() {
        let state = AppState::fake();
        let body = CreateHeadshotBody {
            user_id: 1,
            original_image_url: "not a url".into(),
            background_style: BackgroundStyle::Plain,
            attire: Attire::Casual,
            expression: Expression::Smiling,
        };
        let err = create_headshot(State(state), Json(body)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_headshot_rejects_invalid_generated_url() {
        let state = AppState::fake();
        let body = UpdateHeadshotBody {
            generated_image_url: Some(Some("no-scheme".into())),
            ..Default::default()
        };
        let err = update_headshot(State(state), Path(3), Json(body))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
