//! `review analyze --example` で解析するサンプルコード
//!
//! 構文エラー・弱い比較・ハードコードされた認証情報を意図的に含む。

pub const EXAMPLE_CODE: &str = r#"function calculateTotal(items) {
  var total = 0;
  for (var i = 0; i < items.length; i++) {
    total += items[i].price * items[i].quantity;
  }
  return total.
}

// user input is not validated
function login(username, password) {
  if (username == "admin" && password == 123456") {
    return true;
  }
  return false;
}"#;
