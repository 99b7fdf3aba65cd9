pub mod client;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

pub use client::StorageProxyClient;
pub use memory::MemoryStore;
// StorageError は errors モジュールで定義済み
pub use crate::errors::StorageError;

/// オブジェクトの格納場所（バケット + キー）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
    /// ストレージクライアント向けのリージョンヒント
    pub region: Option<String>,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            region: None,
        }
    }

    /// `bucket/key` 形式のパス
    pub fn path(&self) -> String {
        format!("{}/{}", self.bucket, self.key)
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// オブジェクトストレージ
///
/// リトライやバックオフは実装側の責務とする
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// オブジェクトを取得する
    async fn fetch(&self, location: &ObjectLocation) -> Result<Bytes, StorageError>;

    /// オブジェクトを書き込む
    async fn store(
        &self,
        location: &ObjectLocation,
        data: Bytes,
        content_type: &'static str,
    ) -> Result<(), StorageError>;
}
