//! HTTP surface: the update endpoint, the JSON listing, and the HTML page.

use axum::routing::{any, get};
use axum::Router;
use secrecy::SecretString;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::{PolicyStore, StoreError};

mod pages;
pub mod routes;

/// Shared server state.
///
/// The two datastore clients mirror the access split of the hosted backend:
/// `writer` carries the privileged service-role key (update endpoint only),
/// `reader` carries the public anonymous key (listing surfaces). Either may
/// be `None` when the corresponding configuration is absent; handlers report
/// that per-request rather than failing at startup.
pub struct AppState {
    pub writer: Option<PolicyStore>,
    pub reader: Option<PolicyStore>,
}

impl AppState {
    /// Build the datastore clients from whatever configuration is present.
    ///
    /// Only an actually-present but insecure base URL is an error; missing
    /// values just leave the matching client unconfigured.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let writer = match (&config.supabase_url, &config.service_role_key) {
            (Some(url), Some(key)) => {
                Some(PolicyStore::new(url, SecretString::from(key.clone()))?)
            }
            _ => {
                tracing::warn!("Update endpoint unconfigured: missing datastore URL or service key");
                None
            }
        };
        let reader = match (&config.supabase_url, &config.anon_key) {
            (Some(url), Some(key)) => {
                Some(PolicyStore::new(url, SecretString::from(key.clone()))?)
            }
            _ => {
                tracing::warn!("Listing unconfigured: missing datastore URL or anonymous key");
                None
            }
        };
        Ok(Self { writer, reader })
    }
}

/// Assemble the application router.
///
/// `/api/update` is registered for every method so the handler itself can
/// answer disallowed ones with the structured 405 body.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::listing_page))
        .route("/api/policies", get(routes::list_policies))
        .route("/api/update", any(routes::update_policies))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the listener and serve until shutdown.
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
