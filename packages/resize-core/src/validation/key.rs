use crate::constants::MAX_KEY_LENGTH;

/// オブジェクトキーを検証する
///
/// キーは不透明な文字列として扱い、空白や非 ASCII 文字も許可する。
/// HTTP パスとして正規化されてしまう `.` / `..` セグメントと制御文字のみ拒否する
///
/// エラー時は理由を返す
pub fn validate_key(key: &str) -> Result<(), String> {
    // 空文字チェック
    if key.is_empty() {
        return Err("key is empty".to_string());
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(format!("key is too long (max {MAX_KEY_LENGTH})"));
    }

    if key.starts_with('/') {
        return Err("key must not start with '/'".to_string());
    }

    // パストラバーサル防止（セグメント単位）
    if key.split('/').any(|segment| segment == "." || segment == "..") {
        return Err("path traversal detected".to_string());
    }

    if key.chars().any(char::is_control) {
        return Err("control characters in key".to_string());
    }

    Ok(())
}

/// バケット名を検証する
pub fn validate_bucket(bucket: &str) -> Result<(), String> {
    if bucket.is_empty() {
        return Err("bucket is empty".to_string());
    }

    if bucket.contains('/') || bucket.contains('\\') {
        return Err("bucket must not contain path separators".to_string());
    }

    Ok(())
}
