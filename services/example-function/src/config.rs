// サンプル関数の設定
//
// 環境変数からリクエスト先や挨拶相手を読み込む。
// 全て未設定の場合は元のサンプルと同じ動作になる。

use tracing::info;

/// デフォルトのリクエスト先URL
pub const DEFAULT_TARGET_URL: &str = "https://httpbin.org/get";

/// デフォルトのHTTPメソッド
pub const DEFAULT_TARGET_HTTP_METHOD: &str = "GET";

/// デフォルトの挨拶相手
pub const DEFAULT_GREETING_NAME: &str = "AWS Lambda";

/// 環境変数名: リクエスト先URL
pub const ENV_TARGET_URL: &str = "TARGET_URL";

/// 環境変数名: HTTPメソッド
pub const ENV_TARGET_HTTP_METHOD: &str = "TARGET_HTTP_METHOD";

/// 環境変数名: 挨拶相手
pub const ENV_GREETING_NAME: &str = "GREETING_NAME";

/// サンプル関数の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    /// リクエスト先URL
    pub target_url: String,
    /// HTTPメソッド
    pub http_method: String,
    /// 挨拶相手の名前
    pub greeting_name: String,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            http_method: DEFAULT_TARGET_HTTP_METHOD.to_string(),
            greeting_name: DEFAULT_GREETING_NAME.to_string(),
        }
    }
}

impl FunctionConfig {
    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - TARGET_URL: リクエスト先URL（デフォルト: https://httpbin.org/get）
    /// - TARGET_HTTP_METHOD: HTTPメソッド（デフォルト: GET）
    /// - GREETING_NAME: 挨拶相手（デフォルト: AWS Lambda）
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_env() -> Self {
        let target_url = env_or_default(ENV_TARGET_URL, DEFAULT_TARGET_URL);
        let http_method = env_or_default(ENV_TARGET_HTTP_METHOD, DEFAULT_TARGET_HTTP_METHOD);
        let greeting_name = env_or_default(ENV_GREETING_NAME, DEFAULT_GREETING_NAME);

        info!(
            target_url = %target_url,
            http_method = %http_method,
            greeting_name = %greeting_name,
            "FunctionConfig loaded"
        );

        Self {
            target_url,
            http_method,
            greeting_name,
        }
    }
}

/// 環境変数を読み込み、未設定または空の場合はデフォルト値を返す
fn env_or_default(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
