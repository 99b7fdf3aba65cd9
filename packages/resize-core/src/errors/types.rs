use thiserror::Error;

/// エラーの発生段階
///
/// 呼び出し側はメッセージ文字列ではなくこの値で分岐する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Fetch,
    Decode,
    Resample,
    Encode,
    Store,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fetch => "fetch",
            Self::Decode => "decode",
            Self::Resample => "resample",
            Self::Encode => "encode",
            Self::Store => "store",
        }
    }
}

/// リサイズ処理の統合エラー型
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("fetch failed for {location}: {source}")]
    Fetch {
        location: String,
        #[source]
        source: StorageError,
    },

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("store failed for {location}: {source}")]
    Store {
        location: String,
        #[source]
        source: StorageError,
    },
}

impl MediaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Fetch { .. } => ErrorKind::Fetch,
            Self::Transform(err) => err.kind(),
            Self::Store { .. } => ErrorKind::Store,
        }
    }
}

/// リクエスト検証エラー
///
/// 最初に違反したフィールドのみを表す
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("source location is missing")]
    MissingSource,

    #[error("invalid source location: {0}")]
    InvalidSource(String),

    #[error("destination location is missing")]
    MissingDestination,

    #[error("invalid destination location: {0}")]
    InvalidDestination(String),

    #[error("output format is missing")]
    MissingFormat,

    #[error("unrecognized output format: {0}")]
    UnknownFormat(String),

    #[error("target measurement is missing")]
    MissingMeasurement,

    #[error("target measurement must be greater than zero")]
    ZeroMeasurement,

    #[error("invalid target measurement: {0}")]
    InvalidMeasurement(String),
}

impl ValidationError {
    /// 違反したリクエストフィールド名
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingSource | Self::InvalidSource(_) => "source",
            Self::MissingDestination | Self::InvalidDestination(_) => "destination",
            Self::MissingFormat | Self::UnknownFormat(_) => "out_format",
            Self::MissingMeasurement | Self::ZeroMeasurement | Self::InvalidMeasurement(_) => {
                "resolution"
            }
        }
    }
}

/// ストレージアクセスエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("access denied")]
    Forbidden,

    #[error("object too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("storage error: {0}")]
    Internal(String),
}

/// 画像変換エラー
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("source image has degenerate dimensions ({width}x{height})")]
    DegenerateSource { width: u32, height: u32 },

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u64, height: u64 },

    #[error("resample failed: {0}")]
    Resample(String),

    #[error("encode failed: {0}")]
    Encode(String),
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(_) | Self::DegenerateSource { .. } => ErrorKind::Decode,
            Self::ResolutionTooLarge { .. } | Self::Resample(_) => ErrorKind::Resample,
            Self::Encode(_) => ErrorKind::Encode,
        }
    }
}
