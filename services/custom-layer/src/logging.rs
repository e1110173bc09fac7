/// ログ基盤モジュール
///
/// Lambda環境向けの構造化ログ設定を提供する。
/// Layerを利用する全ての関数が同じ形式でCloudWatchに出力できるよう、
/// tracingクレートを使用したJSON形式の出力を共通化する。
use std::sync::Once;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// JSON形式での構造化ログ出力を設定し、環境変数`RUST_LOG`または
/// デフォルトのログレベル（info）でフィルタリングを行う。
///
/// この関数は複数回呼び出しても安全で、最初の呼び出しのみ初期化を実行する。
/// 他のサブスクライバーが既に登録されている場合は何もしない。
///
/// # 使用例
/// ```ignore
/// use custom_layer::init_logging;
///
/// init_logging();
/// tracing::info!("Lambda function started");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer(std::io::stdout))
            .try_init();
    });
}

/// JSON形式のログレイヤー（Lambda/CloudWatch向け）
///
/// イベントのフィールドはトップレベルに展開する。
fn json_layer<S, W>(make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .flatten_event(true)
        .with_current_span(false)
        .with_writer(make_writer)
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// 出力をメモリに蓄積するテスト用ライター
    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl CapturedOutput {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).expect("各行はJSONであるべき"))
                .collect()
        }
    }

    impl Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedOutput {
        type Writer = CapturedOutput;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_init_logging_idempotent() {
        init_logging();
        init_logging();
    }

    #[test]
    fn test_init_test_logging_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    /// 構造化フィールドがJSONのトップレベルに展開される
    #[test]
    fn test_json_layer_flattens_event_fields() {
        let output = CapturedOutput::default();
        let subscriber = tracing_subscriber::registry().with(json_layer(output.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(url = "https://example.com", status = 200, "HTTPリクエスト成功");
        });

        let lines = output.lines();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["message"], "HTTPリクエスト成功");
        assert_eq!(line["url"], "https://example.com");
        assert_eq!(line["status"], 200);
        assert!(line["target"].as_str().unwrap().starts_with("custom_layer"));
        assert!(line["line_number"].is_number());
        assert!(line.get("fields").is_none());
    }

    /// spanの中で出力してもcurrent spanは含めない
    #[test]
    fn test_json_layer_omits_current_span() {
        let output = CapturedOutput::default();
        let subscriber = tracing_subscriber::registry().with(json_layer(output.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("invocation", request_id = "req-123");
            let _guard = span.enter();
            tracing::warn!(error = "connection refused", "HTTPリクエスト失敗");
        });

        let lines = output.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["level"], "WARN");
        assert_eq!(lines[0]["error"], "connection refused");
        assert!(lines[0].get("span").is_none());
    }
}
