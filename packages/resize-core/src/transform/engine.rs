use std::num::NonZeroU32;

use crate::constants::OUTPUT_QUALITY;
use crate::errors::TransformError;
use crate::transform::decode::decode_image;
use crate::transform::dimensions::calculate_target_dimensions;
use crate::transform::encode::encode_image;
use crate::transform::format::OutputFormat;
use crate::transform::resample::resample_image;

/// エンコード済みの出力画像
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

/// 画像をデコードし、目標寸法にリサンプルして指定フォーマットで再エンコードする
///
/// 1 回の呼び出しで完結し、呼び出し間で状態を持たない。
/// 算出した寸法が元画像と同じ場合はリサンプルを省略する。
pub fn resize(
    input: &[u8],
    target: NonZeroU32,
    format: OutputFormat,
) -> Result<EncodedImage, TransformError> {
    let img = decode_image(input)?;
    let (src_w, src_h) = (img.width(), img.height());

    let (dst_w, dst_h) = calculate_target_dimensions(src_w, src_h, target.get())?;
    tracing::debug!(src_w, src_h, dst_w, dst_h, target = target.get(), "computed target dimensions");

    let resized = if (dst_w, dst_h) != (src_w, src_h) {
        resample_image(&img, dst_w, dst_h, format.supports_alpha())?
    } else {
        img
    };

    let bytes = encode_image(&resized, format, OUTPUT_QUALITY)?;

    Ok(EncodedImage {
        bytes,
        width: dst_w,
        height: dst_h,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    fn nz(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    /// グラデーション画像を指定フォーマットでエンコードする
    fn sample(width: u32, height: u32, format: OutputFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        encode_image(&DynamicImage::ImageRgb8(img), format, 95).unwrap()
    }

    #[test]
    fn test_landscape_jpeg() {
        let input = sample(400, 200, OutputFormat::Jpeg);
        let output = resize(&input, nz(80), OutputFormat::Jpeg).unwrap();

        assert_eq!((output.width, output.height), (160, 80));
        let decoded = image::load_from_memory(&output.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (160, 80));
        assert_eq!(image::guess_format(&output.bytes).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_landscape_4000x2000_jpeg() {
        // 横長は高さに目標値が適用されるため 1600x800 になる
        let img = DynamicImage::new_rgb8(4000, 2000);
        let input = encode_image(&img, OutputFormat::Jpeg, 95).unwrap();
        let output = resize(&input, nz(800), OutputFormat::Jpeg).unwrap();

        assert_eq!((output.width, output.height), (1600, 800));
        assert_eq!(image::guess_format(&output.bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&output.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1600, 800));
    }

    #[test]
    fn test_square_png() {
        let input = sample(300, 300, OutputFormat::Png);
        let output = resize(&input, nz(150), OutputFormat::Png).unwrap();

        assert_eq!((output.width, output.height), (150, 150));
        let decoded = image::load_from_memory(&output.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (150, 150));
        assert_eq!(image::guess_format(&output.bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_portrait_png_to_jpeg() {
        let input = sample(100, 200, OutputFormat::Png);
        let output = resize(&input, nz(50), OutputFormat::Jpeg).unwrap();

        assert_eq!((output.width, output.height), (50, 100));
        assert_eq!(output.format, OutputFormat::Jpeg);
        let decoded = image::load_from_memory(&output.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (50, 100));
    }

    #[test]
    fn test_upscale() {
        let input = sample(30, 20, OutputFormat::Png);
        let output = resize(&input, nz(40), OutputFormat::Png).unwrap();

        assert_eq!((output.width, output.height), (60, 40));
    }

    #[test]
    fn test_resize_again_keeps_dimensions() {
        let input = sample(400, 200, OutputFormat::Png);
        let first = resize(&input, nz(80), OutputFormat::Png).unwrap();
        let second = resize(&first.bytes, nz(first.height), OutputFormat::Png).unwrap();

        assert_eq!((second.width, second.height), (first.width, first.height));
        // リサンプルを省略するため PNG 同士ではピクセルも変わらない
        let a = image::load_from_memory(&first.bytes).unwrap().to_rgb8();
        let b = image::load_from_memory(&second.bytes).unwrap().to_rgb8();
        assert_eq!(a, b);
    }

    #[test]
    fn test_png_alpha_survives() {
        let img = DynamicImage::new_rgba8(40, 20);
        let input = encode_image(&img, OutputFormat::Png, 95).unwrap();
        let output = resize(&input, nz(10), OutputFormat::Png).unwrap();

        let decoded = image::load_from_memory(&output.bytes).unwrap();
        assert!(decoded.color().has_alpha());
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[test]
    fn test_huge_upscale_is_resample_error() {
        let input = sample(10, 10, OutputFormat::Png);
        let err = resize(&input, nz(31000), OutputFormat::Png).unwrap_err();

        assert_eq!(err.kind(), crate::errors::ErrorKind::Resample);
        assert!(matches!(
            err,
            TransformError::ResolutionTooLarge { width: 31000, height: 31000 }
        ));
    }

    #[test]
    fn test_corrupt_input() {
        let result = resize(b"\x00\x01\x02not an image", nz(100), OutputFormat::Jpeg);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Decode);
    }
}
