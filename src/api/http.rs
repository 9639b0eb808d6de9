//! HTTP surface: the dashboard page plus a small JSON API.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::common::error::DashError;
use crate::features::domain::{FeatureGroup, Selections};
use crate::inference::cache::ArtifactStore;
use crate::inference::domain::RiskLabel;
use crate::inference::service::predict_selections;

use super::render::{self, Outcome};

pub type SharedStore = Arc<ArtifactStore>;

/// Build the application router over a shared artifact store.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(show_page).post(submit_form))
        .route("/health", get(health))
        .route("/api/groups", get(list_groups))
        .route("/api/predict", post(predict_json))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// HTTP status for a failed request.
pub fn status_for(err: &DashError) -> StatusCode {
    match err {
        DashError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DashError::ShapeMismatch { .. } | DashError::ColumnOrder { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Decode `<FIELD_PREFIX><group>` form fields; other fields are ignored.
pub fn selections_from_form(fields: &HashMap<String, String>) -> Selections {
    let mut selections = Selections::none();
    for (name, value) in fields {
        if let Some(group) = name.strip_prefix(render::FIELD_PREFIX) {
            selections.choose(group, value.as_str());
        }
    }
    selections
}

async fn health() -> &'static str {
    "ok"
}

async fn show_page(State(store): State<SharedStore>) -> Response {
    match store.get().await {
        Ok(artifacts) => {
            Html(render::page(&artifacts, &Selections::none(), Outcome::Pending)).into_response()
        }
        Err(err) => unavailable(err),
    }
}

async fn submit_form(
    State(store): State<SharedStore>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let artifacts = match store.get().await {
        Ok(artifacts) => artifacts,
        Err(err) => return unavailable(err),
    };
    let selections = selections_from_form(&fields);

    match predict_selections(&artifacts, &selections) {
        Ok(prediction) => Html(render::page(
            &artifacts,
            &selections,
            Outcome::Scored(&prediction),
        ))
        .into_response(),
        Err(err) => {
            warn!(code = err.code() as u32, error = %err, "prediction failed");
            let html = render::page(&artifacts, &selections, Outcome::Failed(&err));
            (status_for(&err), Html(html)).into_response()
        }
    }
}

fn unavailable(err: DashError) -> Response {
    warn!(code = err.code() as u32, error = %err, "artifacts unavailable");
    (status_for(&err), Html(render::unavailable(&err))).into_response()
}

#[derive(Debug, Serialize)]
struct GroupsResponse<'a> {
    groups: &'a [FeatureGroup],
}

async fn list_groups(State(store): State<SharedStore>) -> Result<Response, ApiError> {
    let artifacts = store.get().await?;
    Ok(Json(GroupsResponse {
        groups: artifacts.groups.as_slice(),
    })
    .into_response())
}

#[derive(Debug, Deserialize)]
struct PredictRequest {
    #[serde(default)]
    selections: Selections,
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    label: u8,
    risk: RiskLabel,
    verdict: &'static str,
    confidence: Option<f64>,
}

async fn predict_json(
    State(store): State<SharedStore>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let artifacts = store.get().await?;
    let prediction = predict_selections(&artifacts, &req.selections)?;
    Ok(Json(PredictResponse {
        label: prediction.label.class(),
        risk: prediction.label,
        verdict: prediction.label.headline(),
        confidence: prediction.confidence,
    }))
}

/// JSON error body `{ "error", "code" }` with the mapped status.
pub struct ApiError(DashError);

impl From<DashError> for ApiError {
    fn from(err: DashError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: u32,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(code = self.0.code() as u32, error = %self.0, "request failed");
        let body = ErrorBody {
            error: self.0.to_string(),
            code: self.0.code() as u32,
        };
        (status_for(&self.0), Json(body)).into_response()
    }
}
