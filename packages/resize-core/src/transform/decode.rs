use crate::constants::MAX_DIMENSION;
use crate::errors::TransformError;
use image::{DynamicImage, ImageReader, Limits};
use std::io::Cursor;

/// 画像バイト列をデコードする
///
/// フォーマットはマジックナンバーから推測する。
/// 幅・高さのいずれかが 0 の画像、または `MAX_DIMENSION` を超える画像は
/// デコード失敗として扱う。
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, TransformError> {
    let mut reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| TransformError::Decode(format!("failed to guess format: {e}")))?;

    if reader.format().is_none() {
        return Err(TransformError::Decode("unrecognized image format".to_string()));
    }

    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_DIMENSION);
    limits.max_image_height = Some(MAX_DIMENSION);
    reader.limits(limits);

    let img = reader
        .decode()
        .map_err(|e| TransformError::Decode(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(TransformError::DegenerateSource {
            width: img.width(),
            height: img.height(),
        });
    }

    Ok(img)
}
