use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_ticket::aggregate::{
    Ticket, TicketDto, TicketFilter, TicketId, TicketPatch,
};

use crate::domain::a001_ticket;
use crate::shared::error::AppError;
use crate::shared::extract::{AppJson, AppPath, AppQuery};
use crate::shared::state::AppState;

/// GET /api/v1/tickets?assignee=&status=&priority=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<TicketFilter>,
) -> Result<Json<Vec<Ticket>>, AppError> {
    let tickets = a001_ticket::service::list(&state.db, filter).await?;
    Ok(Json(tickets))
}

/// POST /api/v1/tickets
pub async fn create(
    State(state): State<AppState>,
    AppJson(dto): AppJson<TicketDto>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    let ticket = a001_ticket::service::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/v1/tickets/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<TicketId>,
) -> Result<Json<Ticket>, AppError> {
    let ticket = a001_ticket::service::get_by_id(&state.db, id).await?;
    Ok(Json(ticket))
}

/// PATCH /api/v1/tickets/:id
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<TicketId>,
    AppJson(patch): AppJson<TicketPatch>,
) -> Result<Json<Ticket>, AppError> {
    let ticket = a001_ticket::service::update(&state.db, id, patch).await?;
    Ok(Json(ticket))
}

/// DELETE /api/v1/tickets/:id
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<TicketId>,
) -> Result<StatusCode, AppError> {
    a001_ticket::service::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
