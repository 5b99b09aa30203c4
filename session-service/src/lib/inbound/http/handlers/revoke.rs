use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::middleware::extract_bearer_token;
use crate::inbound::http::router::AppState;

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = extract_bearer_token(&headers)?;

    state.session_service.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}
