//! HTTP app assembly: intake routes, landing page, static assets, CORS.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::intake::{IntakeRouteState, IntakeService, intake_routes};

#[derive(Clone)]
struct LandingState {
    index: PathBuf,
}

/// GET /
///
/// Serves `index.html` from the static dir, or a JSON status if there is none.
async fn landing(State(state): State<LandingState>) -> Response {
    match tokio::fs::read_to_string(&state.index).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %state.index.display(), error = %e, "Failed to read landing page");
            }
            Json(serde_json::json!({ "status": "Broker intake chatbot running" })).into_response()
        }
    }
}

/// Build a CORS layer. An empty origin list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the full application router.
pub fn app(config: &ServerConfig, service: Arc<IntakeService>) -> Router {
    let landing_routes = Router::new().route("/", get(landing)).with_state(LandingState {
        index: config.static_dir.join("index.html"),
    });

    intake_routes(IntakeRouteState { service })
        .merge(landing_routes)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(cors_layer(&config.cors_origins))
}

/// Bind the configured address and serve until the process exits.
pub async fn serve(config: &ServerConfig, service: Arc<IntakeService>) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Intake server started");
    axum::serve(listener, app(config, service)).await?;
    Ok(())
}
