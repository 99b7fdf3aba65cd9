use std::net::SocketAddr;

use resize_core::StorageProxyClient;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// ワーカーの設定
pub struct Config {
    pub listen_addr: SocketAddr,
    pub storage: StorageProxyClient,
}

impl Config {
    /// 環境変数から設定を読み込む
    ///
    /// - LISTEN_ADDR（省略時 0.0.0.0:8080）
    /// - STORAGE_PROXY_URL / CF_ACCESS_CLIENT_ID / CF_ACCESS_CLIENT_SECRET
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let listen_addr = lookup("LISTEN_ADDR")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .map_err(|e| format!("LISTEN_ADDR is invalid ({listen_addr}): {e}"))?;

        let storage = StorageProxyClient::from_vars(&lookup)?;

        Ok(Self {
            listen_addr,
            storage,
        })
    }
}
