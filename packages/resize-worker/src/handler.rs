use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::AppState;
use resize_core::{MediaError, ResizeOutcome, ResizeRequest, StorageError, TransformError};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn resize(
    State(state): State<AppState>,
    payload: Result<Json<ResizeRequest>, JsonRejection>,
) -> Result<Json<ResizeOutcome>, AppError> {
    // 本文が JSON として読めない場合も他の検証エラーと同じ形で返す
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(status = %rejection.status(), error = %rejection.body_text(), "rejected resize payload");
        AppError::BadRequest(rejection.body_text())
    })?;

    tracing::info!(
        in_bucket = ?request.in_bucket,
        in_image_key = ?request.in_image_key,
        out_bucket = ?request.out_bucket,
        out_image_key = ?request.out_image_key,
        resolution = ?request.resolution,
        out_format = ?request.out_format,
        return_bytes = request.return_bytes,
        "received resize request"
    );

    let outcome = resize_core::run(state.store.as_ref(), &request).await?;

    tracing::info!(
        out_bucket = %outcome.out_bucket,
        out_image_key = %outcome.out_image_key,
        width = outcome.width,
        height = outcome.height,
        "resize completed"
    );

    Ok(Json(outcome))
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    TransformFailed(String),
    StorageUnavailable(String),
    Internal(String),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        let kind = err.kind().as_str();
        match err {
            MediaError::Validation(validation_err) => {
                tracing::warn!(field = validation_err.field(), error = %validation_err, "validation error");
                AppError::BadRequest(validation_err.to_string())
            }
            MediaError::Fetch { location, source } => {
                tracing::warn!(stage = kind, location = %location, "failed to fetch source image");
                source.into()
            }
            MediaError::Transform(transform_err) => transform_err.into(),
            MediaError::Store { location, source } => {
                // 出力先への書き込み失敗は NotFound であってもサーバー側の問題として扱う
                tracing::error!(stage = kind, location = %location, error = %source, "failed to store resized image");
                AppError::StorageUnavailable(format!("store failed: {source}"))
            }
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { key } => {
                tracing::warn!(key = %key, "object not found");
                AppError::NotFound("object not found".to_string())
            }
            StorageError::Forbidden => {
                tracing::error!("access denied by Storage Proxy (check CF Access credentials)");
                AppError::StorageUnavailable("storage access denied".to_string())
            }
            StorageError::TooLarge { size, max } => {
                tracing::warn!(size = size, max = max, "source object too large");
                AppError::BadRequest(format!("source object too large: {size} bytes (max {max})"))
            }
            StorageError::Internal(msg) => {
                tracing::error!(error = %msg, "storage error");
                AppError::StorageUnavailable("storage error".to_string())
            }
        }
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::Decode(msg) => {
                tracing::warn!(error = %msg, "failed to decode source image");
                AppError::TransformFailed(format!("decode failed: {msg}"))
            }
            TransformError::DegenerateSource { width, height } => {
                tracing::warn!(width = %width, height = %height, "source image has degenerate dimensions");
                AppError::TransformFailed(format!("source image has degenerate dimensions ({width}x{height})"))
            }
            TransformError::ResolutionTooLarge { width, height } => {
                tracing::warn!(width = %width, height = %height, "image resolution too large");
                AppError::TransformFailed(format!("target resolution {width}x{height} exceeds maximum"))
            }
            TransformError::Resample(msg) => {
                tracing::error!(error = %msg, "image resampling failed");
                AppError::TransformFailed(msg)
            }
            TransformError::Encode(msg) => AppError::Internal(format!("encode failed: {msg}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::TransformFailed(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::StorageUnavailable(msg) => {
                tracing::error!(error = %msg, "storage unavailable");
                (StatusCode::BAD_GATEWAY, "storage unavailable".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
