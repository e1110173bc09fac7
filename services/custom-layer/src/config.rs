// HTTPクライアント設定
//
// 環境変数からタイムアウト設定を読み込む。
// 未設定の場合はHTTPクライアントのデフォルト（タイムアウトなし）に任せる。

use std::time::Duration;

use tracing::info;

/// 環境変数名: リクエスト全体のタイムアウト（秒）
pub const ENV_HTTP_REQUEST_TIMEOUT_SECS: &str = "HTTP_REQUEST_TIMEOUT_SECS";

/// 環境変数名: 接続タイムアウト（秒）
pub const ENV_HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CONNECT_TIMEOUT_SECS";

/// HTTPクライアント設定
///
/// `None`のフィールドはクライアントに設定せず、デフォルト動作のままにする。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// リクエスト全体のタイムアウト
    pub request_timeout: Option<Duration>,
    /// 接続タイムアウト
    pub connect_timeout: Option<Duration>,
}

impl HttpClientConfig {
    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - HTTP_REQUEST_TIMEOUT_SECS: リクエスト全体のタイムアウト（秒）
    /// - HTTP_CONNECT_TIMEOUT_SECS: 接続タイムアウト（秒）
    ///
    /// 未設定、パースエラー、または0の場合は`None`となる。
    pub fn from_env() -> Self {
        let request_timeout = parse_env_secs(ENV_HTTP_REQUEST_TIMEOUT_SECS);
        let connect_timeout = parse_env_secs(ENV_HTTP_CONNECT_TIMEOUT_SECS);

        info!(
            request_timeout = ?request_timeout,
            connect_timeout = ?connect_timeout,
            "HttpClientConfig loaded"
        );

        Self {
            request_timeout,
            connect_timeout,
        }
    }

    /// リクエストタイムアウトを設定
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// 接続タイムアウトを設定
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

/// 環境変数から秒数を読み込む
fn parse_env_secs(key: &str) -> Option<Duration> {
    let value = std::env::var(key).ok()?;
    match value.trim().parse::<u64>() {
        Ok(0) => {
            info!(key, "Environment variable is zero, ignoring");
            None
        }
        Ok(secs) => {
            info!(key, value = secs, "Environment variable loaded");
            Some(Duration::from_secs(secs))
        }
        Err(_) => {
            info!(key, value = %value, "Environment variable parse error, ignoring");
            None
        }
    }
}
