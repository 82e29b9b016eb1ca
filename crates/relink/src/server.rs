use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use relink_core::{RelinkError, RelinkResult};
use relink_music::MusicConverter;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct ConvertLinkRequest {
    #[serde(rename = "ObjectURL")]
    pub object_url: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertLinkResponse {
    #[serde(rename = "Link")]
    pub link: String,
}

pub async fn serve(converter: MusicConverter, addr: &str) -> RelinkResult<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|err| RelinkError::Config(format!("invalid server address '{addr}': {err}")))?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|err| RelinkError::Config(format!("failed to bind {addr}: {err}")))?;

    info!(%addr, "serving POST /convert");
    axum::serve(listener, router(converter))
        .await
        .map_err(|err| RelinkError::Config(format!("server stopped: {err}")))
}

pub fn router(converter: MusicConverter) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/convert", post(convert))
        .layer(Extension(Arc::new(converter)))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn convert(
    Extension(converter): Extension<Arc<MusicConverter>>,
    Json(request): Json<ConvertLinkRequest>,
) -> Result<Json<ConvertLinkResponse>, ApiError> {
    let result = converter.convert(&request.object_url).await?;
    Ok(Json(ConvertLinkResponse {
        link: result.target_url,
    }))
}

pub struct ApiError(RelinkError);

impl From<RelinkError> for ApiError {
    fn from(err: RelinkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            warn!(kind = self.0.kind(), "conversion failed: {}", self.0);
        }
        let body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

fn status_for(err: &RelinkError) -> StatusCode {
    match err {
        RelinkError::InvalidUrl(_)
        | RelinkError::UnknownService(_)
        | RelinkError::UnsupportedEntity(_)
        | RelinkError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        RelinkError::NoResults(_) | RelinkError::NoArtistData(_) => StatusCode::NOT_FOUND,
        RelinkError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        RelinkError::AuthFailure(_) | RelinkError::Upstream(_) | RelinkError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
        RelinkError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
