// HTTPリクエストラッパー
//
// URLとHTTPメソッドを受け取り、1回だけリクエストを送信して
// HTTPクライアントのレスポンスをそのまま返す。
// 再試行・バックオフ・エラーのラップは行わない。

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::HttpClientConfig;

/// メソッドが指定されない場合に使用するデフォルトのHTTPメソッド
pub const DEFAULT_METHOD: &str = "GET";

/// HTTPリクエストのエラー型
///
/// # エラー種別
/// - `InvalidMethod`: HTTPメソッドとして解釈できない文字列
/// - `Request`: HTTPクライアントが返したエラー（ネットワーク、タイムアウト、プロトコル）
#[derive(Debug, Error)]
pub enum HttpRequestError {
    /// 不正なHTTPメソッド
    #[error("不正なHTTPメソッド: {0}")]
    InvalidMethod(String),

    /// HTTPクライアントのエラー（メッセージは加工しない）
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// HTTPクライアント構築エラー
#[derive(Debug, Error)]
#[error("HTTPクライアントの構築に失敗: {0}")]
pub struct HttpClientBuildError(#[from] reqwest::Error);

/// HTTPリクエスト送信トレイト
///
/// ハンドラーからHTTPクライアントを切り離し、テストでモックに差し替えるための境界。
#[async_trait]
pub trait HttpRequester: Send + Sync {
    /// リクエストを1回送信し、レスポンスをそのまま返す
    ///
    /// # 引数
    /// * `url` - リクエスト先URL
    /// * `method` - HTTPメソッド（`None`の場合は`DEFAULT_METHOD`）
    ///
    /// # 戻り値
    /// * `Ok(Response)` - ステータスコードに関わらずレスポンスを受信できた
    /// * `Err(HttpRequestError)` - メソッド不正、またはHTTPクライアントのエラー
    async fn request(&self, url: &str, method: Option<&str>) -> Result<Response, HttpRequestError>;
}

/// reqwestを使用したHttpRequester実装
#[derive(Debug, Clone)]
pub struct ReqwestHttpRequester {
    client: Client,
}

impl ReqwestHttpRequester {
    /// 設定からHTTPクライアントを構築
    ///
    /// タイムアウトが`None`の場合はクライアントのデフォルトのまま。
    pub fn new(config: &HttpClientConfig) -> Result<Self, HttpClientBuildError> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder.build()?;
        Ok(Self { client })
    }

    /// 構築済みのクライアントから作成
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpRequester for ReqwestHttpRequester {
    #[instrument(skip(self))]
    async fn request(&self, url: &str, method: Option<&str>) -> Result<Response, HttpRequestError> {
        let method = parse_method(method.unwrap_or(DEFAULT_METHOD))?;
        debug!(method = %method, "HTTPリクエスト送信");

        let response = self.client.request(method, url).send().await?;

        info!(status = %response.status(), "HTTPレスポンス受信");
        Ok(response)
    }
}

/// HTTPメソッド文字列をパースする
///
/// 大文字・小文字は区別しない（"post"は"POST"として扱う）。
pub fn parse_method(method: &str) -> Result<Method, HttpRequestError> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| HttpRequestError::InvalidMethod(method.to_string()))
}

/// デフォルト設定のHTTPクライアントでリクエストを1回送信する
///
/// # 引数
/// * `url` - リクエスト先URL
/// * `method` - HTTPメソッド（`None`の場合は"GET"）
///
/// # 戻り値
/// HTTPクライアントのレスポンス。エラーは加工せずに返す。
pub async fn make_http_request(
    url: &str,
    method: Option<&str>,
) -> Result<Response, HttpRequestError> {
    let client = Client::builder().build()?;
    ReqwestHttpRequester::from_client(client)
        .request(url, method)
        .await
}
