use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::constants::MAX_INPUT_SIZE;
use crate::errors::StorageError;
use crate::storage::{ObjectLocation, ObjectStore};

const REGION_HEADER: &str = "X-Storage-Region";

/// Storage Proxy クライアント
///
/// Storage Proxy に HTTP リクエストを送信して
/// `{base_url}/{bucket}/{key}` のオブジェクトを取得・保存する
#[derive(Clone)]
pub struct StorageProxyClient {
    client: Client,
    base_url: String,
    cf_access_client_id: String,
    cf_access_client_secret: String,
}

impl StorageProxyClient {
    /// 新しい StorageProxyClient を作成する
    pub fn new(
        base_url: String,
        cf_access_client_id: String,
        cf_access_client_secret: String,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cf_access_client_id,
            cf_access_client_secret,
        }
    }

    /// 環境変数から StorageProxyClient を作成する
    ///
    /// 必須の環境変数:
    /// - STORAGE_PROXY_URL
    /// - CF_ACCESS_CLIENT_ID
    /// - CF_ACCESS_CLIENT_SECRET
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// 任意の変数ソースから StorageProxyClient を作成する
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let var = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| format!("{name} is not set"))
        };

        let base_url = var("STORAGE_PROXY_URL")?;
        let cf_access_client_id = var("CF_ACCESS_CLIENT_ID")?;
        let cf_access_client_secret = var("CF_ACCESS_CLIENT_SECRET")?;

        Ok(Self::new(base_url, cf_access_client_id, cf_access_client_secret))
    }

    /// バケットとキーの各セグメントをパーセントエンコードして URL を組み立てる
    fn object_url(&self, location: &ObjectLocation) -> String {
        let key = location
            .key
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(&location.bucket),
            key
        )
    }

    /// 認証ヘッダーとリージョンヒントを付与する
    fn authorize(&self, builder: RequestBuilder, location: &ObjectLocation) -> RequestBuilder {
        let builder = builder
            .header("CF-Access-Client-Id", &self.cf_access_client_id)
            .header("CF-Access-Client-Secret", &self.cf_access_client_secret);

        match &location.region {
            Some(region) => builder.header(REGION_HEADER, region),
            None => builder,
        }
    }
}

/// レスポンスのステータスを StorageError に変換する
fn check_status(response: &Response, location: &ObjectLocation) -> Result<(), StorageError> {
    match response.status() {
        status if status.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(StorageError::NotFound {
            key: location.key.clone(),
        }),
        StatusCode::FORBIDDEN => {
            tracing::error!(location = %location, "access denied by Storage Proxy");
            Err(StorageError::Forbidden)
        }
        status => {
            tracing::error!(location = %location, status = %status, "unexpected response from Storage Proxy");
            Err(StorageError::Internal(format!("unexpected status: {status}")))
        }
    }
}

#[async_trait]
impl ObjectStore for StorageProxyClient {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Bytes, StorageError> {
        let url = self.object_url(location);

        let response = self
            .authorize(self.client.get(&url), location)
            .send()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        check_status(&response, location)?;

        // 読み込み前に Content-Length でサイズを確認
        if let Some(size) = response.content_length()
            && size > MAX_INPUT_SIZE
        {
            return Err(StorageError::TooLarge {
                size,
                max: MAX_INPUT_SIZE,
            });
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        // 読み込み後にもサイズを確認
        let actual_size = data.len() as u64;
        if actual_size > MAX_INPUT_SIZE {
            return Err(StorageError::TooLarge {
                size: actual_size,
                max: MAX_INPUT_SIZE,
            });
        }

        Ok(data)
    }

    async fn store(
        &self,
        location: &ObjectLocation,
        data: Bytes,
        content_type: &'static str,
    ) -> Result<(), StorageError> {
        let url = self.object_url(location);

        let response = self
            .authorize(self.client.put(&url), location)
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        check_status(&response, location)
    }
}
