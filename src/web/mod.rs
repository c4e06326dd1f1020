//! Single-page web form for the name generator.

pub mod page;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use tracing::{info, warn};

use crate::{core::chain::NameChain, error::Result, prompts::PromptRequest};
use page::{render_page, Outcome};

struct AppState {
    chain: NameChain,
}

/// `GET /` shows the form; `POST /` runs the chain with the submitted fields.
pub fn router(chain: NameChain) -> Router {
    Router::new()
        .route("/", get(show_form).post(generate))
        .with_state(Arc::new(AppState { chain }))
}

/// Bind `addr` and serve the form until the process exits.
pub async fn serve(addr: SocketAddr, chain: NameChain) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Pet Name Generator listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(chain)).await?;
    Ok(())
}

async fn show_form() -> Html<String> {
    Html(render_page(&PromptRequest::default(), None))
}

// No validation: empty fields go to the model as-is.
async fn generate(
    State(state): State<Arc<AppState>>,
    Form(request): Form<PromptRequest>,
) -> Response {
    match state.chain.invoke(&request).await {
        Ok(names) => Html(render_page(&request, Some(Outcome::Names(&names)))).into_response(),
        Err(err) => {
            warn!(error = %err, "name generation failed");
            let message = err.to_string();
            (
                StatusCode::BAD_GATEWAY,
                Html(render_page(&request, Some(Outcome::Error(&message)))),
            )
                .into_response()
        }
    }
}
