// Custom Lambda Layerのサンプル関数
//
// Layerの挨拶関数とHTTPリクエストラッパーを呼び出し、
// 固定形式のレスポンスを返すハンドラーを提供する。

pub mod config;
pub mod handler;

// 再エクスポート
pub use config::FunctionConfig;
pub use handler::{
    ExampleHandler, HandlerError, HttpStatus, InvocationResponse, ResponseBody, LAYER_INFO,
    RESPONSE_STATUS_CODE,
};
