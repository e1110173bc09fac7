/// Custom Lambda Layerサンプル関数エントリポイント
///
/// Lambda環境ではランタイムに登録して呼び出しを待ち受ける。
/// ローカル環境では空のイベントで1回だけハンドラーを呼び出し、
/// レスポンスをJSONとして標準出力に表示する。
///
/// # 環境変数
/// - TARGET_URL: リクエスト先URL（デフォルト: https://httpbin.org/get）
/// - TARGET_HTTP_METHOD: HTTPメソッド（デフォルト: GET）
/// - GREETING_NAME: 挨拶相手（デフォルト: AWS Lambda）
/// - HTTP_REQUEST_TIMEOUT_SECS / HTTP_CONNECT_TIMEOUT_SECS: タイムアウト（秒、任意）
///
/// # ローカル実行
/// ```bash
/// cargo run --bin example-function
///
/// # イベント指定
/// cargo run --bin example-function -- --event '{"key": "value"}'
/// ```
use clap::Parser;
use custom_layer::{init_logging, HttpClientConfig, HttpRequester, ReqwestHttpRequester};
use example_function::{ExampleHandler, FunctionConfig, InvocationResponse};
use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

/// コマンドライン引数（ローカル実行用）
#[derive(Parser, Debug)]
#[command(name = "example-function")]
#[command(about = "Custom Lambda Layerサンプル関数をローカルで1回呼び出す")]
struct CliArgs {
    /// 呼び出しイベント（JSON形式）
    #[arg(long, short = 'e', default_value = "{}")]
    event: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let requester = ReqwestHttpRequester::new(&HttpClientConfig::from_env())?;
    let handler = ExampleHandler::new(requester, FunctionConfig::from_env());

    // Lambda環境かどうかを判定
    if std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok() {
        info!("Lambda関数として起動");
        let handler = &handler;
        lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
            function_handler(handler, event).await
        }))
        .await?;
    } else {
        info!("ローカルスクリプトとして起動");
        run_local(&handler, CliArgs::parse()).await?;
    }

    Ok(())
}

/// Lambda関数のメインハンドラー
async fn function_handler<R: HttpRequester>(
    handler: &ExampleHandler<R>,
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, Error> {
    let (payload, context) = event.into_parts();

    let response = handler.handle(&payload, &context).await.map_err(|e| {
        error!(error = %e, "ハンドラーの実行に失敗");
        e
    })?;

    Ok(response)
}

/// ローカル実行用関数
///
/// 空のContextでハンドラーを1回呼び出し、結果を整形して表示する。
async fn run_local<R: HttpRequester>(
    handler: &ExampleHandler<R>,
    args: CliArgs,
) -> Result<(), Error> {
    let output = invoke_local(handler, &args.event).await?;
    println!("{}", output);
    Ok(())
}

/// イベントJSONをパースしてハンドラーを呼び出し、整形済みJSONを返す
async fn invoke_local<R: HttpRequester>(
    handler: &ExampleHandler<R>,
    event_json: &str,
) -> Result<String, Error> {
    let event: Value = serde_json::from_str(event_json).map_err(|e| {
        error!(error = %e, json = %event_json, "イベントのJSONパースに失敗");
        Error::from(format!("Invalid event JSON: {}", e))
    })?;

    let response = function_handler(handler, LambdaEvent::new(event, Context::default())).await?;

    Ok(serde_json::to_string_pretty(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 到達不能なURLを設定したハンドラー（外部通信を行わない）
    fn create_unreachable_handler() -> ExampleHandler<ReqwestHttpRequester> {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let config = FunctionConfig {
            target_url: "http://127.0.0.1:1/".to_string(),
            ..FunctionConfig::default()
        };
        ExampleHandler::new(ReqwestHttpRequester::from_client(client), config)
    }

    #[test]
    fn test_cli_default_event_is_empty_object() {
        let args = CliArgs::try_parse_from(["example-function"]).unwrap();
        assert_eq!(args.event, "{}");
    }

    #[test]
    fn test_cli_event_argument() {
        let args = CliArgs::try_parse_from(["example-function", "-e", r#"{"a":1}"#]).unwrap();
        assert_eq!(args.event, r#"{"a":1}"#);

        let args =
            CliArgs::try_parse_from(["example-function", "--event", "[]"]).unwrap();
        assert_eq!(args.event, "[]");
    }

    #[tokio::test]
    async fn test_function_handler_returns_200_on_request_failure() {
        init_logging();
        let handler = create_unreachable_handler();

        let event = LambdaEvent::new(serde_json::json!({}), Context::default());
        let response = function_handler(&handler, event).await.unwrap();

        assert_eq!(response.status_code, 200);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert!(body["http_status"].as_str().unwrap().starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_invoke_local_prints_pretty_response() {
        let handler = create_unreachable_handler();

        let output = invoke_local(&handler, "{}").await.unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert!(output.contains('\n'));
        assert_eq!(parsed["statusCode"], 200);
        assert!(parsed["body"].is_string());
    }

    #[tokio::test]
    async fn test_invoke_local_rejects_invalid_event_json() {
        let handler = create_unreachable_handler();

        let result = invoke_local(&handler, "{not json").await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid event JSON"));
    }
}
