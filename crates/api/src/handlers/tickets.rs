//! Handler for ticket verification approval.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::TrimmedJson;
use crate::state::AppState;

/// Body of `POST /tickets/approve`.
#[derive(Debug, Deserialize, Validate)]
pub struct ApproveTicket {
    #[validate(length(min = 1))]
    pub uuid: String,
    #[validate(length(min = 1))]
    pub signature: String,
}

/// POST /tickets/approve
///
/// Forwards a signed verification to the ticket gateway. A refusal by the
/// gateway becomes a 400; transport and other gateway errors a 500.
pub async fn approve_ticket(
    State(state): State<AppState>,
    TrimmedJson(input): TrimmedJson<ApproveTicket>,
) -> AppResult<StatusCode> {
    state.tickets.approve(&input.uuid, &input.signature).await?;
    tracing::info!(uuid = %input.uuid, "Ticket verification approved");
    Ok(StatusCode::NO_CONTENT)
}
