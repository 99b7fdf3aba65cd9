use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use serde::Serialize;

use crate::errors::MediaError;
use crate::storage::ObjectStore;
use crate::transform;
use crate::validation::{validate_request, ResizeRequest};

/// リサイズ完了時の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResizeOutcome {
    pub out_bucket: String,
    pub out_image_key: String,
    pub width: u32,
    pub height: u32,
    pub content_type: &'static str,
    pub size: usize,
    /// `return_bytes` 指定時のみ、エンコード済み画像の base64
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// 1 件のリサイズ要求を処理する
///
/// 検証 → 取得 → リサイズ → 保存 を順に実行し、最初のエラーで中断する。
/// 保存はリサイズとエンコードが完全に成功した後にのみ行う。
pub async fn run<S>(store: &S, request: &ResizeRequest) -> Result<ResizeOutcome, MediaError>
where
    S: ObjectStore + ?Sized,
{
    let job = validate_request(request)?;

    tracing::info!(source = %job.source, "fetching source image");
    let input = store
        .fetch(&job.source)
        .await
        .map_err(|source| MediaError::Fetch {
            location: job.source.to_string(),
            source,
        })?;

    tracing::info!(
        source = %job.source,
        bytes = input.len(),
        target = job.target.get(),
        format = %job.format,
        "resizing image"
    );
    let output = transform::resize(&input, job.target, job.format)?;
    // 元画像のバッファは保存前に解放する
    drop(input);

    let size = output.bytes.len();
    let content_type = job.format.content_type();
    let data = Bytes::from(output.bytes);
    let image = job.return_bytes.then(|| BASE64.encode(&data));

    tracing::info!(
        destination = %job.destination,
        width = output.width,
        height = output.height,
        bytes = size,
        "storing resized image"
    );
    store
        .store(&job.destination, data, content_type)
        .await
        .map_err(|source| MediaError::Store {
            location: job.destination.to_string(),
            source,
        })?;

    Ok(ResizeOutcome {
        out_bucket: job.destination.bucket,
        out_image_key: job.destination.key,
        width: output.width,
        height: output.height,
        content_type,
        size,
        image,
    })
}
