use crate::errors::TransformError;
use crate::transform::dimensions::validate_output_dimensions;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage, RgbaImage};

/// 画像をリサンプルする
///
/// fast_image_resize の Lanczos3 畳み込みを使用する。
/// カーネルは拡大縮小しない（ぼかし係数 1.0、シャープもぼかしもしない）。
/// `keep_alpha` が true かつ元画像にアルファがある場合は RGBA のまま処理する。
/// 上限を超える寸法はバッファ確保前に `ResolutionTooLarge` で拒否する。
pub fn resample_image(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
    keep_alpha: bool,
) -> Result<DynamicImage, TransformError> {
    if target_w == 0 || target_h == 0 {
        return Err(TransformError::Resample(format!(
            "invalid target dimensions {target_w}x{target_h}"
        )));
    }

    // 変換用バッファを確保する前に寸法を検証する
    validate_output_dimensions(target_w, target_h)?;

    if keep_alpha && img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = convolve(width, height, rgba.into_raw(), PixelType::U8x4, target_w, target_h)?;
        let resized = RgbaImage::from_raw(target_w, target_h, pixels).ok_or_else(|| {
            TransformError::Resample("failed to convert resized image".to_string())
        })?;
        Ok(DynamicImage::ImageRgba8(resized))
    } else {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = convolve(width, height, rgb.into_raw(), PixelType::U8x3, target_w, target_h)?;
        let resized = RgbImage::from_raw(target_w, target_h, pixels).ok_or_else(|| {
            TransformError::Resample("failed to convert resized image".to_string())
        })?;
        Ok(DynamicImage::ImageRgb8(resized))
    }
}

/// Lanczos3 でピクセルバッファを畳み込む
///
/// Resizer とバッファはこの関数内でのみ生存し、どの経路でも解放される
fn convolve(
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    pixel_type: PixelType,
    target_w: u32,
    target_h: u32,
) -> Result<Vec<u8>, TransformError> {
    let src_image = Image::from_vec_u8(width, height, pixels, pixel_type)
        .map_err(|e| TransformError::Resample(format!("failed to create source image: {e}")))?;

    let mut dst_image = Image::new(target_w, target_h, pixel_type);

    // RGBA はアルファ乗算済みで処理される（ResizeOptions のデフォルト）
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));

    let mut resizer = Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| TransformError::Resample(format!("resize failed: {e}")))?;

    Ok(dst_image.into_vec())
}
