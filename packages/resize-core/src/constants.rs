/// 出力画像の圧縮品質（ロスレス形式では無視される）
pub const OUTPUT_QUALITY: u8 = 95;

/// 画像の最大寸法（幅・高さ、入力と出力の両方に適用）
pub const MAX_DIMENSION: u32 = 16_384;

/// リサンプル後の最大ピクセル数（RGBA で約 200MB）
pub const MAX_PIXELS: u64 = 50_000_000;

/// 取得する元画像の最大バイト数
pub const MAX_INPUT_SIZE: u64 = 50 * 1024 * 1024;

/// オブジェクトキーの最大長
pub const MAX_KEY_LENGTH: usize = 1024;
