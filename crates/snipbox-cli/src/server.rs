//! HTTP API layer
//!
//! A single route relays `(code, language)` pairs to the dispatch pipeline
//! and returns whatever structured outcome it resolves to. Request
//! validation happens here; invalid requests never reach the core.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use snipbox::Runner;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CompileRequest {
    #[serde(default)]
    code: Option<String>,

    #[serde(default)]
    language: Option<String>,
}

impl CompileRequest {
    /// Both fields are required and must be non-empty
    fn validate(&self) -> Option<(&str, &str)> {
        match (self.code.as_deref(), self.language.as_deref()) {
            (Some(code), Some(language)) if !code.is_empty() && !language.is_empty() => {
                Some((code, language))
            }
            _ => None,
        }
    }
}

/// Serve the API until the process is stopped
pub async fn serve(runner: Runner, addr: SocketAddr) -> Result<()> {
    let app = router(Arc::new(runner));

    info!(%addr, "listening");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

fn router(runner: Arc<Runner>) -> Router {
    Router::new()
        .route("/api/compile", post(api_compile))
        .with_state(runner)
}

async fn api_compile(
    State(runner): State<Arc<Runner>>,
    Json(request): Json<CompileRequest>,
) -> impl IntoResponse {
    let Some((code, language)) = request.validate() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Code and language are required"})),
        )
            .into_response();
    };

    let outcome = runner.dispatch(code, language).await;
    Json(outcome).into_response()
}
