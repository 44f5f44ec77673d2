use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::model::Classifier;
use crate::pipeline::run_pipeline;
use crate::report::{ResponseStyle, failure_body, success_body};

/// Cross-origin policy for the HTTP surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CorsPolicy {
    #[default]
    Any,
    Disabled,
}

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub style: ResponseStyle,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    estimators: usize,
    voting: &'static str,
}

pub fn build_router(state: AppState, cors: CorsPolicy) -> Router {
    let router = Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors {
        CorsPolicy::Any => router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        ),
        CorsPolicy::Disabled => router,
    }
}

pub async fn serve(addr: SocketAddr, router: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

async fn predict(State(state): State<AppState>, body: Bytes) -> Response {
    match run_pipeline(state.classifier.as_ref(), &body) {
        Ok(result) => {
            tracing::info!(has_tdah = result.has_tdah, "prediction served");
            (StatusCode::OK, Json(success_body(&result, state.style))).into_response()
        }
        Err(err) => {
            if err.is_client_error() {
                tracing::warn!(kind = err.code(), "rejected evaluation: {err}");
            } else {
                tracing::error!(kind = err.code(), "prediction failed: {err}");
            }
            (err.status(), Json(failure_body(&err, state.style))).into_response()
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let summary = state.classifier.describe();
    Json(HealthBody {
        status: "ok",
        estimators: summary.estimators,
        voting: summary.voting,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/server/tests.rs"]
mod tests;
