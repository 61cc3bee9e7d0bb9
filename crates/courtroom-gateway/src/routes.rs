//! Upload routes. Each validates a fixed body shape, pins the body as received and answers
//! `{"status":"success","ipfs_hash","gateway_url"}`; pinning failures become
//! `500 {"detail": ...}`. Anything unrouted is echoed back for debugging agent calls.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use courtroom_core::{ContentKind, ContentRecord, CourtError, Persona, PinningService};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Portraits from the image model run a few MB as PNG.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pinning: Arc<dyn PinningService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/personas", post(upload_persona).fallback(echo))
        .route("/argument", post(upload_argument).fallback(echo))
        .route("/evidence", post(upload_evidence).fallback(echo))
        .route("/complaint", post(upload_complaint).fallback(echo))
        .route("/image", post(upload_image).fallback(echo))
        .fallback(echo)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(Arc::new(state))
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn unprocessable(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.into(),
        }
    }
}

impl From<CourtError> for ApiError {
    fn from(err: CourtError) -> Self {
        tracing::error!(target: "courtroom::gateway", error = %err, "Upload failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

async fn health() -> &'static str {
    "OK"
}

/// Checks `body` has the shape of `T` without altering what gets pinned.
fn validate<T: DeserializeOwned>(body: &Value) -> Result<T, ApiError> {
    serde_json::from_value(body.clone()).map_err(|e| ApiError::unprocessable(e.to_string()))
}

async fn pin_and_respond(state: &AppState, label: &str, body: &Value) -> ApiResult {
    let cid = state.pinning.pin_json(label, body).await?;
    Ok(success(state, cid))
}

fn success(state: &AppState, cid: String) -> Json<Value> {
    let gateway_url = state.pinning.gateway_url(&cid);
    tracing::info!(target: "courtroom::gateway", cid = %cid, url = %gateway_url, "Pinned");
    Json(json!({
        "status": "success",
        "ipfs_hash": cid,
        "gateway_url": gateway_url,
    }))
}

async fn upload_persona(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> ApiResult {
    let persona: Persona = validate(&body)?;
    pin_and_respond(&state, &format!("{}.json", persona.name), &body).await
}

async fn upload_content(kind: ContentKind, state: &AppState, body: Value) -> ApiResult {
    let record: ContentRecord = validate(&body)?;
    tracing::debug!(target: "courtroom::gateway", kind = kind.as_str(), "Content upload");
    pin_and_respond(state, &record.pin_label(), &body).await
}

async fn upload_argument(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> ApiResult {
    upload_content(ContentKind::Argument, &state, body).await
}

async fn upload_evidence(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> ApiResult {
    upload_content(ContentKind::Evidence, &state, body).await
}

async fn upload_complaint(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> ApiResult {
    upload_content(ContentKind::Complaint, &state, body).await
}

async fn upload_image(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> ApiResult {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::unprocessable(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::unprocessable(e.body_text()))?;
        upload = Some((file_name, bytes));
        break;
    }
    let (file_name, bytes) =
        upload.ok_or_else(|| ApiError::unprocessable("multipart field 'file' is required"))?;

    // Staged on disk before pinning; the temp file is removed on drop.
    let staged = tempfile::NamedTempFile::new().map_err(CourtError::from)?;
    tokio::fs::write(staged.path(), &bytes)
        .await
        .map_err(CourtError::from)?;
    let contents = tokio::fs::read(staged.path())
        .await
        .map_err(CourtError::from)?;

    let cid = state.pinning.pin_file(&file_name, contents).await?;
    Ok(success(&state, cid))
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap) -> Json<Value> {
    let host = headers
        .get("host")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let url = format!("http://{}{}", host, uri);
    let header_map: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();
    tracing::info!(target: "courtroom::gateway", method = %method, uri = %uri, "Echoing unrouted request");
    Json(json!({
        "path": uri.path().trim_start_matches('/'),
        "method": method.as_str(),
        "url": url,
        "headers": header_map,
    }))
}
