use crate::constants::{MAX_DIMENSION, MAX_PIXELS};
use crate::errors::TransformError;

/// 派生軸の長さを計算する（切り捨て除算）
///
/// `measurement * numerator / denominator` を 64bit で計算し、
/// u32 に収まらない場合はリサンプル不可としてエラーを返す
fn derive_axis(measurement: u32, numerator: u32, denominator: u32) -> Option<u32> {
    let derived = measurement as u64 * numerator as u64 / denominator as u64;
    u32::try_from(derived).ok()
}

/// 目標寸法を計算する
///
/// 横長（W > H）の場合は高さを `target` に合わせ、幅を比率から求める。
/// それ以外（H ≥ W、正方形を含む）は幅を `target` に合わせ、高さを比率から求める。
/// 端数は丸めずに切り捨てる。拡大も許可する。
pub fn calculate_target_dimensions(
    src_w: u32,
    src_h: u32,
    target: u32,
) -> Result<(u32, u32), TransformError> {
    if src_w == 0 || src_h == 0 {
        return Err(TransformError::DegenerateSource {
            width: src_w,
            height: src_h,
        });
    }

    if src_w > src_h {
        let new_h = target;
        let new_w = derive_axis(new_h, src_w, src_h).ok_or(TransformError::ResolutionTooLarge {
            width: new_h as u64 * src_w as u64 / src_h as u64,
            height: new_h as u64,
        })?;
        Ok((new_w, new_h))
    } else {
        let new_w = target;
        let new_h = derive_axis(new_w, src_h, src_w).ok_or(TransformError::ResolutionTooLarge {
            width: new_w as u64,
            height: new_w as u64 * src_h as u64 / src_w as u64,
        })?;
        Ok((new_w, new_h))
    }
}

/// 出力画像のサイズを検証する
///
/// バッファ確保前に呼び出し、1 辺の長さと総ピクセル数の上限を確認する
pub fn validate_output_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    let total_pixels = width as u64 * height as u64;
    if width > MAX_DIMENSION || height > MAX_DIMENSION || total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: width as u64,
            height: height as u64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape() {
        // 横長は高さ基準
        assert_eq!(calculate_target_dimensions(4000, 2000, 800).unwrap(), (1600, 800));
        assert_eq!(calculate_target_dimensions(1920, 1080, 600).unwrap(), (1066, 600));
    }

    #[test]
    fn test_portrait() {
        // 縦長は幅基準
        assert_eq!(calculate_target_dimensions(100, 200, 50).unwrap(), (50, 100));
        assert_eq!(calculate_target_dimensions(1080, 1920, 600).unwrap(), (600, 1066));
    }

    #[test]
    fn test_square() {
        assert_eq!(calculate_target_dimensions(300, 300, 150).unwrap(), (150, 150));
        assert_eq!(calculate_target_dimensions(1, 1, 1).unwrap(), (1, 1));
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        // 3 * 5 / 2 = 7.5 → 7
        assert_eq!(calculate_target_dimensions(5, 2, 3).unwrap(), (7, 3));
        // 7 * 300 / 200 = 10.5 → 10
        assert_eq!(calculate_target_dimensions(300, 200, 7).unwrap(), (10, 7));
        // 9 * 1000 / 999 = 9.009 → 9
        assert_eq!(calculate_target_dimensions(999, 1000, 9).unwrap(), (9, 9));
    }

    #[test]
    fn test_upscale_allowed() {
        assert_eq!(calculate_target_dimensions(20, 10, 100).unwrap(), (200, 100));
    }

    #[test]
    fn test_aspect_ratio_within_one_pixel() {
        let sources = [(4000, 3000), (3000, 4000), (1234, 567), (567, 1234), (999, 1000)];
        for (w, h) in sources {
            for target in [1, 17, 256, 1000] {
                let (new_w, new_h) = calculate_target_dimensions(w, h, target).unwrap();
                let exact = if w > h {
                    new_h as f64 * w as f64 / h as f64 - new_w as f64
                } else {
                    new_w as f64 * h as f64 / w as f64 - new_h as f64
                };
                assert!((0.0..1.0).contains(&exact), "{w}x{h} -> {new_w}x{new_h}");
            }
        }
    }

    #[test]
    fn test_same_measurement_is_noop() {
        let (w, h) = calculate_target_dimensions(4000, 2000, 800).unwrap();
        assert_eq!(calculate_target_dimensions(w, h, h).unwrap(), (w, h));

        let (w, h) = calculate_target_dimensions(100, 200, 50).unwrap();
        assert_eq!(calculate_target_dimensions(w, h, w).unwrap(), (w, h));
    }

    #[test]
    fn test_degenerate_source() {
        assert!(matches!(
            calculate_target_dimensions(0, 100, 50),
            Err(TransformError::DegenerateSource { width: 0, height: 100 })
        ));
        assert!(matches!(
            calculate_target_dimensions(100, 0, 50),
            Err(TransformError::DegenerateSource { .. })
        ));
    }

    #[test]
    fn test_validate_output_dimensions() {
        assert!(validate_output_dimensions(1600, 800).is_ok());
        assert!(validate_output_dimensions(MAX_DIMENSION, 1).is_ok());

        // 1 辺が上限を超える
        assert!(matches!(
            validate_output_dimensions(MAX_DIMENSION + 1, 1),
            Err(TransformError::ResolutionTooLarge { .. })
        ));

        // 1 辺は上限内だが総ピクセル数が超える
        let result = validate_output_dimensions(MAX_DIMENSION, MAX_DIMENSION);
        assert!(matches!(result, Err(TransformError::ResolutionTooLarge { .. })));
    }

    #[test]
    fn test_large_upscale_is_rejected_before_allocation() {
        let (w, h) = calculate_target_dimensions(10, 10, 31000).unwrap();
        assert_eq!((w, h), (31000, 31000));

        match validate_output_dimensions(w, h).unwrap_err() {
            TransformError::ResolutionTooLarge { width, height } => {
                assert_eq!((width, height), (31000, 31000));
            }
            other => panic!("expected ResolutionTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_axis() {
        let result = calculate_target_dimensions(u32::MAX, 1, u32::MAX);
        assert!(matches!(result, Err(TransformError::ResolutionTooLarge { .. })));
    }
}
