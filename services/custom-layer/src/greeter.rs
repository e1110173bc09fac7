// 挨拶メッセージ生成
//
// 副作用もエラーもない純粋関数のみを提供する。

/// 名前が指定されない場合に使用するデフォルト名
pub const DEFAULT_NAME: &str = "World";

/// 挨拶メッセージを生成する
///
/// # 引数
/// * `name` - 挨拶する相手の名前（`None`の場合は`DEFAULT_NAME`）
///
/// # 戻り値
/// 名前を埋め込んだ挨拶メッセージ
pub fn greet(name: Option<&str>) -> String {
    let name = name.unwrap_or(DEFAULT_NAME);
    format!("Hello, {}! Function from custom_helpers.utils", name)
}
