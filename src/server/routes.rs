use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::Html;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{pages, AppState};
use crate::filter::filter_policies;
use crate::store::{NewPolicy, Policy, StoreError};

type ApiError = (StatusCode, Json<Value>);

#[derive(Deserialize)]
pub struct ListParams {
    /// Search term; matched case-insensitively against title and content.
    pub q: Option<String>,
}

/// `GET|POST /api/update` — append the placeholder policy record.
///
/// Every invocation inserts one row; there is no deduplication, so repeated
/// calls append indistinguishable duplicates. The handler checks the
/// configuration before attempting any outbound call and relays the
/// datastore's verdict as-is.
pub async fn update_policies(
    State(state): State<Arc<AppState>>,
    method: Method,
) -> Result<Json<Value>, ApiError> {
    if method != Method::GET && method != Method::POST {
        return Err((
            StatusCode::METHOD_NOT_ALLOWED,
            Json(json!({ "error": "Method not allowed" })),
        ));
    }

    let store = state.writer.as_ref().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Missing SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY" })),
        )
    })?;

    let policy = NewPolicy::sample(Utc::now().date_naive());
    match store.insert_policy(&policy).await {
        Ok(inserted) => {
            tracing::info!(id = inserted.id, "Policy inserted");
            Ok(Json(json!({ "message": "Policy inserted", "policy": inserted })))
        }
        Err(StoreError::Rejected { status, details }) => {
            tracing::warn!(status, "Datastore rejected policy insert");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to insert policy", "details": details })),
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "Policy insert failed unexpectedly");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Unexpected error", "details": e.to_string() })),
            ))
        }
    }
}

/// `GET /api/policies?q=` — the filtered listing as JSON.
pub async fn list_policies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Policy>> {
    let all = load_policies(&state).await;
    Json(filter_policies(&all, params.q.as_deref().unwrap_or("")))
}

/// `GET /?q=` — the filtered listing rendered as an HTML page.
pub async fn listing_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Html<String> {
    let all = load_policies(&state).await;
    let term = params.q.as_deref().unwrap_or("");
    let filtered = filter_policies(&all, term);
    Html(pages::render_listing(&filtered, term))
}

/// Fetch the full policy set for the listing surfaces.
///
/// A read failure (or missing read configuration) is logged and yields an
/// empty set: the listing shows nothing rather than an error state.
async fn load_policies(state: &AppState) -> Vec<Policy> {
    let Some(reader) = state.reader.as_ref() else {
        tracing::error!("Listing unconfigured: missing SUPABASE_URL or SUPABASE_ANON_KEY");
        return Vec::new();
    };
    match reader.list_policies().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching policies");
            Vec::new()
        }
    }
}
