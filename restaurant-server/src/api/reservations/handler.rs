//! Reservations API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{Reservation, ReservationCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db;
use crate::db::reservations::NewReservation;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PARTY_SIZE, MAX_SHORT_TEXT_LEN, parse_date, parse_time,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, db_err};

/// POST /api/reservations - 预订 (登录用户记录为预订人)
pub async fn create(
    State(state): State<ServerState>,
    user: Option<CurrentUser>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let name = payload.name.trim();
    let phone = payload.phone.trim();
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    if !(1..=MAX_PARTY_SIZE).contains(&payload.party_size) {
        return Err(AppError::with_message(
            ErrorCode::ReservationInvalidPartySize,
            format!("party_size must be between 1 and {MAX_PARTY_SIZE}"),
        )
        .with_detail("party_size", payload.party_size));
    }

    let date = parse_date(&payload.date)?.format("%Y-%m-%d").to_string();
    let time = parse_time(&payload.time)?.format("%H:%M").to_string();
    let notes = payload
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let reservation = db::reservations::create(
        &state.pool,
        &NewReservation {
            user_id: user.as_ref().map(|u| u.id),
            name,
            phone,
            party_size: payload.party_size,
            date: &date,
            time: &time,
            notes,
        },
    )
    .await
    .map_err(db_err)?;

    tracing::info!(
        reservation_id = reservation.id,
        date = %reservation.date,
        time = %reservation.time,
        party_size = reservation.party_size,
        "Reservation created"
    );
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /api/reservations - 全部预订, 按日期时间排序
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = db::reservations::list(&state.pool)
        .await
        .map_err(db_err)?;
    Ok(Json(reservations))
}
