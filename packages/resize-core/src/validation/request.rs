use std::num::NonZeroU32;

use serde::Deserialize;

use crate::errors::ValidationError;
use crate::storage::ObjectLocation;
use crate::transform::OutputFormat;
use crate::validation::key::{validate_bucket, validate_key};

/// リサイズ要求（トリガーのペイロード）
///
/// 欠落したフィールドを特定できるよう、すべて Option で受け取る
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResizeRequest {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub in_bucket: Option<String>,
    #[serde(default)]
    pub in_image_key: Option<String>,
    #[serde(default)]
    pub out_bucket: Option<String>,
    #[serde(default)]
    pub out_image_key: Option<String>,
    #[serde(default)]
    pub resolution: Option<Measurement>,
    #[serde(default)]
    pub out_format: Option<String>,
    /// true の場合、エンコード済みバイト列を base64 で結果に含める
    #[serde(default)]
    pub return_bytes: bool,
}

/// 目標寸法の生の値
///
/// 数値と数値文字列（`"800"`）の両方を受け付け、範囲の検証は
/// `validate_request` で行う
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Measurement {
    fn to_target(&self) -> Result<NonZeroU32, ValidationError> {
        let value = match self {
            Self::Integer(n) => *n,
            Self::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => *f as i64,
            Self::Float(f) => return Err(ValidationError::InvalidMeasurement(f.to_string())),
            Self::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidMeasurement(text.clone()))?,
        };

        if value == 0 {
            return Err(ValidationError::ZeroMeasurement);
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| ValidationError::InvalidMeasurement(value.to_string()))
    }
}

impl From<u32> for Measurement {
    fn from(value: u32) -> Self {
        Self::Integer(value as i64)
    }
}

/// 検証済みのリサイズジョブ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeJob {
    pub source: ObjectLocation,
    pub destination: ObjectLocation,
    pub target: NonZeroU32,
    pub format: OutputFormat,
    pub return_bytes: bool,
}

/// リサイズ要求を検証する
///
/// 入力元 → 出力先 → 出力フォーマットの有無 → フォーマットの妥当性 → 目標寸法
/// の順に確認し、最初の違反のみを返す
pub fn validate_request(request: &ResizeRequest) -> Result<ResizeJob, ValidationError> {
    let source = location(
        request.in_bucket.as_deref(),
        request.in_image_key.as_deref(),
        request.region.as_deref(),
    )
    .ok_or(ValidationError::MissingSource)?
    .map_err(ValidationError::InvalidSource)?;

    let destination = location(
        request.out_bucket.as_deref(),
        request.out_image_key.as_deref(),
        request.region.as_deref(),
    )
    .ok_or(ValidationError::MissingDestination)?
    .map_err(ValidationError::InvalidDestination)?;

    let format: OutputFormat = request
        .out_format
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .ok_or(ValidationError::MissingFormat)?
        .parse()?;

    let target = request
        .resolution
        .as_ref()
        .ok_or(ValidationError::MissingMeasurement)?
        .to_target()?;

    Ok(ResizeJob {
        source,
        destination,
        target,
        format,
        return_bytes: request.return_bytes,
    })
}

/// バケットとキーからロケーションを組み立てる
///
/// どちらかが欠けていれば None、値が不正なら Some(Err) を返す
fn location(
    bucket: Option<&str>,
    key: Option<&str>,
    region: Option<&str>,
) -> Option<Result<ObjectLocation, String>> {
    let bucket = bucket.filter(|b| !b.is_empty())?;
    let key = key.filter(|k| !k.is_empty())?;

    let checked = validate_bucket(bucket).and_then(|_| validate_key(key)).map(|_| ObjectLocation {
        bucket: bucket.to_string(),
        key: key.to_string(),
        region: region.filter(|r| !r.is_empty()).map(str::to_string),
    });
    Some(checked)
}
