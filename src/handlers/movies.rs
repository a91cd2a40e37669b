use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        actor::Actor,
        movie::{Movie, MoviePayload, MovieResponse},
    },
    repositories::{ActorRepository, MovieRepository},
    types::{ActorId, MovieId},
    utils::{pagination::total_pages, time::now_local},
};

#[derive(Debug, Deserialize)]
pub struct MovieListQuery {
    pub page: Option<u32>,
    pub search: Option<String>,
    /// Restrict to movies that still have upcoming sessions.
    pub current: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub movies: Vec<Movie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i64>,
}

pub async fn list_movies(
    State((pool, config)): State<(PgPool, Config)>,
    Query(query): Query<MovieListQuery>,
) -> Result<Json<MovieListResponse>, AppError> {
    let repo = MovieRepository::new();

    if query.current.unwrap_or(false) {
        let now = now_local(&config.time_zone);
        let movies = repo
            .select_with_upcoming_sessions(&pool, now, query.page)
            .await?;
        let total_pages = match query.page {
            Some(_) => Some(total_pages(
                repo.count_with_upcoming_sessions(&pool, now).await?,
            )),
            None => None,
        };
        return Ok(Json(MovieListResponse { movies, total_pages }));
    }

    let movies = repo
        .select_all(&pool, query.search.as_deref(), query.page)
        .await?;
    let total_pages = match query.page {
        Some(_) => Some(total_pages(repo.count_all(&pool).await?)),
        None => None,
    };
    Ok(Json(MovieListResponse { movies, total_pages }))
}

pub async fn get_movie(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<MovieId>,
) -> Result<Json<MovieResponse>, AppError> {
    let repo = MovieRepository::new();
    let movie = repo.find_by_id(&pool, id).await?;
    let cast = repo.cast_of(&pool, id).await?;
    Ok(Json(MovieResponse::from_parts(movie, cast)))
}

pub async fn create_movie(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<MoviePayload>,
) -> Result<(StatusCode, Json<MovieResponse>), AppError> {
    payload.validate()?;

    let repo = MovieRepository::new();
    let movie = repo.create_with_cast(&pool, &payload).await?;
    let cast = repo.cast_of(&pool, movie.id).await?;

    info!(movie_id = %movie.id, "movie created");
    Ok((StatusCode::CREATED, Json(MovieResponse::from_parts(movie, cast))))
}

pub async fn update_movie(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<MovieId>,
    Json(payload): Json<MoviePayload>,
) -> Result<Json<MovieResponse>, AppError> {
    payload.validate()?;

    let repo = MovieRepository::new();
    let movie = repo.update_with_cast(&pool, id, &payload).await?;
    let cast = repo.cast_of(&pool, id).await?;
    Ok(Json(MovieResponse::from_parts(movie, cast)))
}

pub async fn delete_movie(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<MovieId>,
) -> Result<StatusCode, AppError> {
    let removed = MovieRepository::new().delete_cascade(&pool, id).await?;
    if !removed {
        return Err(AppError::NotFound("Movie not found".to_string()));
    }

    info!(movie_id = %id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ActorListQuery {
    pub search: Option<String>,
}

pub async fn list_actors(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(query): Query<ActorListQuery>,
) -> Result<Json<Vec<Actor>>, AppError> {
    let actors = ActorRepository::new()
        .select_all(&pool, query.search.as_deref())
        .await?;
    Ok(Json(actors))
}

pub async fn list_movies_by_actor(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(actor_id): Path<ActorId>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = MovieRepository::new()
        .select_by_actor(&pool, actor_id)
        .await?;
    Ok(Json(movies))
}
