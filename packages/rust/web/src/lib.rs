//! Web front-end for the CDP docs helper.
//!
//! | Method | Path   | Description |
//! |--------|--------|-------------|
//! | `GET`  | `/`    | Question form |
//! | `POST` | `/ask` | Answer the urlencoded `question` field |
//!
//! The router holds no global state: the [`Assistant`] it serves is passed
//! in once and shared read-only between requests.

pub mod page;

use std::sync::Arc;

use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use cdpdocs_core::{Assistant, DocumentSource};
use cdpdocs_shared::{CdpDocsError, Result};

/// Form body of `POST /ask`. A missing field counts as an empty question.
#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
}

/// Build the router serving `assistant`.
pub fn router<S>(assistant: Arc<Assistant<S>>) -> Router
where
    S: DocumentSource + 'static,
{
    Router::new()
        .route("/", get(handle_index))
        .route("/ask", post(handle_ask::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(assistant)
}

/// Bind to `bind` and serve until Ctrl-C.
pub async fn serve<S>(bind: &str, assistant: Arc<Assistant<S>>) -> Result<()>
where
    S: DocumentSource + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| CdpDocsError::Network(format!("failed to bind {bind}: {e}")))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| CdpDocsError::Network(e.to_string()))?;
    info!(%local_addr, products = assistant.products().len(), "web front-end listening");

    axum::serve(listener, router(assistant))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CdpDocsError::Network(format!("server error: {e}")))?;

    info!("web front-end stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn handle_index() -> Html<String> {
    Html(page::render(None))
}

async fn handle_ask<S>(
    State(assistant): State<Arc<Assistant<S>>>,
    Form(form): Form<AskForm>,
) -> Html<String>
where
    S: DocumentSource + 'static,
{
    let answer = assistant.answer(&form.question).await;
    Html(page::render(Some((&form.question, &answer))))
}
