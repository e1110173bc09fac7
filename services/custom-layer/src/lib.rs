// Custom Lambda Layer 共有ヘルパー
//
// 複数のLambda関数から利用される挨拶関数とHTTPリクエストラッパー、
// および共通のログ・設定基盤を提供する。

pub mod config;
pub mod greeter;
pub mod http_requester;
pub mod logging;

// 再エクスポート
pub use config::HttpClientConfig;
pub use greeter::{greet, DEFAULT_NAME};
pub use http_requester::{
    make_http_request, HttpClientBuildError, HttpRequestError, HttpRequester, ReqwestHttpRequester,
    DEFAULT_METHOD,
};
pub use logging::init_logging;
