//! Token check for the [`/api/dls` endpoint][crate::api#apidls-post].
use crate::api::api_error::APIError;
use crate::api::server::AppState;
use crate::error::Error;
use axum::extract::{ConnectInfo, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, Method, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;

/// Rejects `POST` requests whose `Authorization` header isn't exactly the configured token.
/// Other methods pass through so the route can answer them with 405.
pub(super) async fn require_token<B>(
    State(state): State<AppState>,
    client_addr: Option<ConnectInfo<SocketAddr>>,
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, APIError> {
    if request.method() == Method::POST {
        let supplied = request
            .headers()
            .get(AUTHORIZATION)
            .map_or(&[][..], HeaderValue::as_bytes);
        if !state.config.token_matches(supplied) {
            match client_addr {
                Some(ConnectInfo(addr)) => {
                    tracing::warn!("unauthorized access attempt from {addr}");
                }
                None => tracing::warn!("unauthorized access attempt"),
            }
            return Err(Error::Unauthorized.into());
        }
    }
    Ok(next.run(request).await)
}
