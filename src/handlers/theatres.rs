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
    models::theatre::{Theatre, TheatrePayload, TheatreResponse, TheatreSummary},
    repositories::{
        transaction::{begin_transaction, commit_transaction},
        CinemaRepository, SeatRepository, SessionRepository, TheatreRepository,
    },
    services::seating::{flatten_grid, grid_of},
    types::{CinemaId, TheatreId},
};

pub async fn get_theatre(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<TheatreId>,
) -> Result<Json<TheatreResponse>, AppError> {
    let theatre = TheatreRepository::new().find_by_id(&pool, id).await?;
    theatre_response(&pool, theatre).await.map(Json)
}

pub async fn list_theatres_by_cinema(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(cinema_id): Path<CinemaId>,
) -> Result<Json<Vec<TheatreSummary>>, AppError> {
    // 404 for an unknown cinema rather than an empty list.
    CinemaRepository::new().find_by_id(&pool, cinema_id).await?;

    let seats = SeatRepository::new();
    let theatres = TheatreRepository::new()
        .list_by_cinema(&pool, cinema_id)
        .await?;

    let mut summaries = Vec::with_capacity(theatres.len());
    for theatre in theatres {
        let seat_count = seats.usable_seat_count(&pool, theatre.id).await?;
        summaries.push(TheatreSummary {
            id: theatre.id,
            number: theatre.theatre_number,
            theatre_type: theatre.theatre_type,
            seat_count,
        });
    }
    Ok(Json(summaries))
}

pub async fn create_theatre(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<TheatrePayload>,
) -> Result<(StatusCode, Json<TheatreResponse>), AppError> {
    payload.validate()?;
    let slots = flatten_grid(&payload.seats)
        .map_err(|err| AppError::UnprocessableEntity(err.to_string()))?;

    let mut tx = begin_transaction(&pool).await?;
    let theatre = TheatreRepository::new()
        .create_in_tx(&mut tx, payload.number, payload.theatre_type, payload.cinema_id)
        .await?;
    SeatRepository::new()
        .replace_layout_in_tx(&mut tx, theatre.id, &slots)
        .await?;
    commit_transaction(tx).await?;

    info!(theatre_id = %theatre.id, cinema_id = %theatre.cinema_id, "theatre created");
    let response = theatre_response(&pool, theatre).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_theatre(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<TheatreId>,
    Json(payload): Json<TheatrePayload>,
) -> Result<Json<TheatreResponse>, AppError> {
    payload.validate()?;
    let slots = flatten_grid(&payload.seats)
        .map_err(|err| AppError::UnprocessableEntity(err.to_string()))?;

    // Theatre row and full layout replacement commit together.
    let mut tx = begin_transaction(&pool).await?;
    let theatre = TheatreRepository::new()
        .update_in_tx(
            &mut tx,
            id,
            payload.number,
            payload.theatre_type,
            payload.cinema_id,
        )
        .await?;
    SeatRepository::new()
        .replace_layout_in_tx(&mut tx, id, &slots)
        .await?;
    commit_transaction(tx).await?;

    theatre_response(&pool, theatre).await.map(Json)
}

pub async fn delete_theatre(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<TheatreId>,
) -> Result<StatusCode, AppError> {
    let mut tx = begin_transaction(&pool).await?;
    SessionRepository::new()
        .delete_by_theatre_in_tx(&mut tx, id)
        .await?;
    SeatRepository::new()
        .delete_by_theatre_in_tx(&mut tx, id)
        .await?;
    let removed = TheatreRepository::new().delete_in_tx(&mut tx, id).await?;
    if !removed {
        return Err(AppError::NotFound("Theatre not found".to_string()));
    }
    commit_transaction(tx).await?;

    info!(theatre_id = %id, "theatre deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn theatre_response(pool: &PgPool, theatre: Theatre) -> Result<TheatreResponse, AppError> {
    let seats = SeatRepository::new();
    let slots = seats.list_by_theatre(pool, theatre.id).await?;
    let seat_count = seats.usable_seat_count(pool, theatre.id).await?;

    Ok(TheatreResponse {
        id: theatre.id,
        number: theatre.theatre_number,
        theatre_type: theatre.theatre_type,
        cinema_id: theatre.cinema_id,
        seats: grid_of(slots),
        seat_count,
    })
}
