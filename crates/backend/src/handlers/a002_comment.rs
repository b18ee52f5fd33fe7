use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_ticket::aggregate::TicketId;
use contracts::domain::a002_comment::aggregate::{Comment, CommentDto, CommentId};

use crate::domain::a002_comment;
use crate::shared::error::AppError;
use crate::shared::extract::{AppJson, AppPath};
use crate::shared::state::AppState;

/// GET /api/v1/tickets/:id/comments
pub async fn list(
    State(state): State<AppState>,
    AppPath(ticket_id): AppPath<TicketId>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = a002_comment::service::list(&state.db, ticket_id).await?;
    Ok(Json(comments))
}

/// POST /api/v1/tickets/:id/comments
pub async fn create(
    State(state): State<AppState>,
    AppPath(ticket_id): AppPath<TicketId>,
    AppJson(dto): AppJson<CommentDto>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = a002_comment::service::create(&state.db, ticket_id, dto).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/v1/tickets/:id/comments/:comment_id
pub async fn delete(
    State(state): State<AppState>,
    AppPath((ticket_id, comment_id)): AppPath<(TicketId, CommentId)>,
) -> Result<StatusCode, AppError> {
    a002_comment::service::delete(&state.db, ticket_id, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
