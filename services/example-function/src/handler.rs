/// サンプル関数ハンドラー
///
/// Layerの`greet`を呼び出した後、HTTPリクエストを1回送信し、
/// その結果を固定形式のレスポンスにまとめる。
///
/// HTTPリクエストのエラーはレスポンスボディ内の文字列として報告し、
/// 呼び出し自体は常にステータスコード200で成功する。
use custom_layer::{greet, HttpRequester};
use lambda_runtime::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::FunctionConfig;

/// レスポンスのステータスコード（HTTPリクエストの結果に関わらず固定）
pub const RESPONSE_STATUS_CODE: u16 = 200;

/// レスポンスボディの`layer_info`に入る固定文字列
pub const LAYER_INFO: &str = "Custom Lambda Layer is working!";

/// HTTPリクエストの結果
///
/// 成功時はステータスコード（数値）、失敗時は"Error: "で始まる文字列として
/// シリアライズされる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HttpStatus {
    /// レスポンスのステータスコード
    Code(u16),
    /// エラー内容
    Error(String),
}

impl HttpStatus {
    /// エラーから"Error: {内容}"形式の結果を作成
    ///
    /// reqwestのエラーは最上位のメッセージに原因（接続拒否・タイムアウト等）を
    /// 含まないため、`source()`の連鎖を": "で連結して根本原因まで記載する。
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        HttpStatus::Error(format!("Error: {}", describe_error_chain(error)))
    }
}

/// エラーとその原因の連鎖を1行の文字列にする
///
/// 直前と同じ文言の原因（透過的なラップ）は重複して出力しない。
fn describe_error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut description = error.to_string();
    let mut previous = description.clone();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if text != previous {
            description.push_str(": ");
            description.push_str(&text);
        }
        previous = text;
        source = cause.source();
    }

    description
}

/// レスポンスボディ（JSON文字列として`body`に格納される）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseBody {
    /// 挨拶メッセージ
    pub message: String,
    /// HTTPリクエストの結果
    pub http_status: HttpStatus,
    /// Layer動作確認メッセージ
    pub layer_info: String,
}

/// Lambda呼び出しのレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// ステータスコード（常に200）
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// シリアライズ済みのResponseBody
    pub body: String,
}

/// ハンドラーのエラー型
#[derive(Debug, Error)]
pub enum HandlerError {
    /// レスポンスボディのシリアライズエラー
    #[error("レスポンスボディのシリアライズに失敗: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// サンプル関数ハンドラー
pub struct ExampleHandler<R>
where
    R: HttpRequester,
{
    /// HTTPリクエスター
    requester: R,
    /// 関数設定
    config: FunctionConfig,
}

impl<R> ExampleHandler<R>
where
    R: HttpRequester,
{
    /// 新しいExampleHandlerを作成
    pub fn new(requester: R, config: FunctionConfig) -> Self {
        Self { requester, config }
    }

    /// Lambda呼び出しを処理
    ///
    /// # 処理フロー
    /// 1. 設定された名前で挨拶メッセージを生成
    /// 2. 設定されたURLへHTTPリクエストを送信（エラーは文字列に変換）
    /// 3. ステータスコード200と結果JSONを返却
    ///
    /// # 引数
    /// * `_event` - 呼び出しイベント（参照しない）
    /// * `_context` - ランタイム情報（参照しない）
    #[instrument(skip_all)]
    pub async fn handle(
        &self,
        _event: &Value,
        _context: &Context,
    ) -> Result<InvocationResponse, HandlerError> {
        let message = greet(Some(&self.config.greeting_name));

        let http_status = match self
            .requester
            .request(&self.config.target_url, Some(&self.config.http_method))
            .await
        {
            Ok(response) => {
                let status = response.status().as_u16();
                info!(
                    url = %self.config.target_url,
                    status,
                    "HTTPリクエスト成功"
                );
                HttpStatus::Code(status)
            }
            Err(e) => {
                warn!(
                    url = %self.config.target_url,
                    error = %e,
                    "HTTPリクエスト失敗、エラー内容をレスポンスに含める"
                );
                HttpStatus::from_error(&e)
            }
        };

        let body = ResponseBody {
            message,
            http_status,
            layer_info: LAYER_INFO.to_string(),
        };

        Ok(InvocationResponse {
            status_code: RESPONSE_STATUS_CODE,
            body: serde_json::to_string(&body)?,
        })
    }
}
