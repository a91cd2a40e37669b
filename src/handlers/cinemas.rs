use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::cinema::{Cinema, CinemaPayload},
    repositories::CinemaRepository,
    types::CinemaId,
};

pub async fn list_cinemas(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<Cinema>>, AppError> {
    let cinemas = CinemaRepository::new().find_all(&pool).await?;
    Ok(Json(cinemas))
}

pub async fn get_cinema(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<CinemaId>,
) -> Result<Json<Cinema>, AppError> {
    let cinema = CinemaRepository::new().find_by_id(&pool, id).await?;
    Ok(Json(cinema))
}

pub async fn create_cinema(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<CinemaPayload>,
) -> Result<(StatusCode, Json<Cinema>), AppError> {
    payload.validate()?;

    // A duplicate name trips the unique constraint and maps to Conflict.
    let cinema = CinemaRepository::new()
        .create(&pool, payload.name.trim(), &payload.build_address())
        .await?;

    info!(cinema_id = %cinema.id, "cinema created");
    Ok((StatusCode::CREATED, Json(cinema)))
}

pub async fn update_cinema(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<CinemaId>,
    Json(payload): Json<CinemaPayload>,
) -> Result<Json<Cinema>, AppError> {
    payload.validate()?;

    let cinema = CinemaRepository::new()
        .update(&pool, id, payload.name.trim(), &payload.build_address())
        .await?;
    Ok(Json(cinema))
}

pub async fn delete_cinema(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<CinemaId>,
) -> Result<StatusCode, AppError> {
    let removed = CinemaRepository::new().delete_cascade(&pool, id).await?;
    if !removed {
        return Err(AppError::NotFound("Cinema not found".to_string()));
    }

    info!(cinema_id = %id, "cinema deleted");
    Ok(StatusCode::NO_CONTENT)
}
