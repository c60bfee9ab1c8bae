use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::errors::Error;
use crate::state::AppState;

/// Gate for the `/api/admin` subtree: `Authorization: Bearer <secret>`,
/// compared in constant time against the configured admin secret.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, Response> {
    let header_value = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::Unauthorized.into_response())?
        .to_str()
        .map_err(|_| Error::Unauthorized.into_response())?;

    let mut parts = header_value.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default();

    if scheme != "Bearer" {
        warn!("Invalid admin auth scheme: {scheme}");
        return Err(Error::Unauthorized.into_response());
    }

    let matches: bool = token
        .as_bytes()
        .ct_eq(state.config.admin_secret.as_bytes())
        .into();
    if !matches {
        return Err(Error::Unauthorized.into_response());
    }

    Ok(next.run(request).await)
}
