use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::session::{SessionCreatedResponse, SessionPayload, SessionResponse, Timeline},
    repositories::{MovieRepository, SessionFilters, SessionRepository, TheatreRepository},
    services::{
        catalog::{MovieCatalog, PgMovieCatalog},
        scheduling::annotate_sessions,
    },
    types::{MovieId, SessionId, TheatreId},
    utils::time::now_local,
};

#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    pub session_date: Option<NaiveDate>,
    pub theatre_id: Option<TheatreId>,
    pub movie_id: Option<MovieId>,
    pub timeline: Option<Timeline>,
    /// Comma-separated relations to embed: "theatre", "movie".
    pub include: Option<String>,
}

pub async fn list_sessions(
    State((pool, config)): State<(PgPool, Config)>,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<Vec<SessionResponse>>, AppError> {
    let filters = SessionFilters {
        date: query.session_date,
        theatre_id: query.theatre_id,
        movie_id: query.movie_id,
        timeline: query.timeline,
    };
    let now = now_local(&config.time_zone);
    let sessions = SessionRepository::new()
        .select_all(&pool, &filters, now)
        .await?;

    let catalog = PgMovieCatalog::new(pool.clone());
    let mut responses = annotate_sessions(&catalog, sessions).await?;

    let include = query.include.as_deref().unwrap_or("");
    if include.split(',').any(|part| part.trim() == "theatre") {
        embed_theatres(&pool, &mut responses).await?;
    }
    if include.split(',').any(|part| part.trim() == "movie") {
        embed_movies(&pool, &mut responses).await?;
    }

    Ok(Json(responses))
}

pub async fn get_session(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = SessionRepository::new().find_by_id(&pool, id).await?;
    let catalog = PgMovieCatalog::new(pool.clone());
    let mut responses = annotate_sessions(&catalog, vec![session]).await?;
    // annotate_sessions returns one response per input session.
    let response = responses
        .pop()
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct TheatreSessionsQuery {
    pub session_date: Option<NaiveDate>,
}

pub async fn list_sessions_by_theatre(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(theatre_id): Path<TheatreId>,
    Query(query): Query<TheatreSessionsQuery>,
) -> Result<Json<Vec<SessionResponse>>, AppError> {
    TheatreRepository::new().find_by_id(&pool, theatre_id).await?;

    let sessions = SessionRepository::new()
        .select_by_theatre(&pool, theatre_id, query.session_date)
        .await?;
    let catalog = PgMovieCatalog::new(pool.clone());
    let responses = annotate_sessions(&catalog, sessions).await?;
    Ok(Json(responses))
}

pub async fn create_session(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<SessionPayload>,
) -> Result<(StatusCode, Json<SessionCreatedResponse>), AppError> {
    let session_time = validate_session_payload(&pool, &payload).await?;

    let session = SessionRepository::new()
        .create(&pool, &payload, session_time)
        .await?;

    info!(session_id = %session.id, theatre_id = %session.theatre_id, "session created");
    Ok((StatusCode::CREATED, Json(SessionCreatedResponse::from(session))))
}

pub async fn update_session(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<SessionId>,
    Json(payload): Json<SessionPayload>,
) -> Result<Json<SessionCreatedResponse>, AppError> {
    let session_time = validate_session_payload(&pool, &payload).await?;

    let session = SessionRepository::new()
        .update(&pool, id, &payload, session_time)
        .await?;
    Ok(Json(SessionCreatedResponse::from(session)))
}

pub async fn delete_session(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, AppError> {
    let removed = SessionRepository::new().delete(&pool, id).await?;
    if !removed {
        return Err(AppError::NotFound("Session not found".to_string()));
    }

    info!(session_id = %id, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Validates the payload and confirms both referenced entities exist.
/// Returns the combined start instant.
async fn validate_session_payload(
    pool: &PgPool,
    payload: &SessionPayload,
) -> Result<chrono::NaiveDateTime, AppError> {
    payload.validate()?;
    let session_time = payload
        .start_instant()
        .ok_or_else(|| AppError::UnprocessableEntity("Invalid session time".to_string()))?;

    let catalog = PgMovieCatalog::new(pool.clone());
    if !catalog.theatre_exists(payload.theatre_id).await? {
        return Err(AppError::NotFound("Theatre not found".to_string()));
    }
    // Confirms the movie exists; the runtime itself is not needed here.
    catalog.run_time_minutes(payload.movie_id).await?;

    Ok(session_time)
}

async fn embed_theatres(
    pool: &PgPool,
    responses: &mut [SessionResponse],
) -> Result<(), AppError> {
    let repo = TheatreRepository::new();
    let mut cache = HashMap::new();
    for response in responses.iter_mut() {
        if !cache.contains_key(&response.theatre_id) {
            let fetched = repo.find_by_id(pool, response.theatre_id).await?;
            cache.insert(response.theatre_id, fetched);
        }
        response.theatre = cache.get(&response.theatre_id).cloned();
    }
    Ok(())
}

async fn embed_movies(pool: &PgPool, responses: &mut [SessionResponse]) -> Result<(), AppError> {
    let repo = MovieRepository::new();
    let mut cache = HashMap::new();
    for response in responses.iter_mut() {
        if !cache.contains_key(&response.movie_id) {
            let fetched = repo.find_by_id(pool, response.movie_id).await?;
            cache.insert(response.movie_id, fetched);
        }
        response.movie = cache.get(&response.movie_id).cloned();
    }
    Ok(())
}
