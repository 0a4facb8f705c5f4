use crate::api::api_error::APIError;
use crate::api::auth;
use crate::api::model::{StatusResult, UpdateResult};
use crate::api::server::AppState;
use crate::error::Error;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{any, post};
use axum::{middleware, Json, Router};
use axum_extra::extract::WithRejection;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/dls",
            post(write_dls)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::require_token,
                ))
                .fallback(method_not_allowed),
        )
        .route("/api/status", any(status))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn write_dls(
    State(state): State<AppState>,
    WithRejection(body, _): WithRejection<Bytes, APIError>,
) -> Result<Json<UpdateResult>, APIError> {
    let last_update = state.dls_file.write(&body).await?;
    tracing::info!(
        "text successfully written to {} at {last_update}",
        state.dls_file.path().display()
    );
    Ok(Json(UpdateResult::success(last_update)))
}

#[allow(clippy::unused_async)]
async fn method_not_allowed() -> APIError {
    Error::MethodNotAllowed.into()
}

async fn status(State(state): State<AppState>) -> Json<StatusResult> {
    let target = state.config.target_path.display().to_string();
    Json(StatusResult::online(target, state.dls_file.last_update().await))
}
