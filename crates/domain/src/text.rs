//! # テキスト変換
//!
//! 保存されるテキストフィールドは文字列表現に強制変換して扱う。
//! 数値の `8` と文字列の `"8"` は同一とみなす。

use serde::{Deserialize, Deserializer, de};
use serde_json::Value as JsonValue;

/// UTF-8 の BOM
const BOM: char = '\u{feff}';

/// JSON 値を文字列表現に変換する
///
/// 文字列・数値・真偽値のみを対象とし、null・配列・オブジェクトは `None` を返す。
pub fn coerce_text(value: &JsonValue) -> Option<String> {
   match value {
      JsonValue::String(s) => Some(s.clone()),
      JsonValue::Number(n) => Some(n.to_string()),
      JsonValue::Bool(b) => Some(b.to_string()),
      JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
   }
}

/// 1 行分の入力を正規化する
///
/// 前後の空白と、先頭の BOM を取り除く。
/// BOM は空白扱いされないため、trim の前後どちらに現れても除去できるよう順に処理する。
pub fn normalize_line(line: &str) -> &str {
   line.trim().trim_start_matches(BOM).trim()
}

// ===== serde ヘルパー =====
//
// ストアには外部で編集された行が混在しうるため、読み込み時も強制変換を適用する。

pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
   D: Deserializer<'de>,
{
   let value = JsonValue::deserialize(deserializer)?;
   coerce_text(&value).ok_or_else(|| de::Error::custom("expected a text value"))
}

pub(crate) fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
   D: Deserializer<'de>,
{
   let value = JsonValue::deserialize(deserializer)?;
   if value.is_null() {
      return Ok(None);
   }
   coerce_text(&value)
      .map(Some)
      .ok_or_else(|| de::Error::custom("expected a text value or null"))
}

pub(crate) fn deserialize_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
   D: Deserializer<'de>,
{
   let values = Vec::<JsonValue>::deserialize(deserializer)?;
   values
      .iter()
      .map(|v| coerce_text(v).ok_or_else(|| de::Error::custom("expected a list of text values")))
      .collect()
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde_json::json;

   use super::*;

   #[rstest]
   #[case(json!("Brasília"), Some("Brasília"))]
   #[case(json!(8), Some("8"))]
   #[case(json!(2.5), Some("2.5"))]
   #[case(json!(true), Some("true"))]
   #[case(json!(null), None)]
   #[case(json!(["a"]), None)]
   #[case(json!({"a": 1}), None)]
   fn test_coerce_textは文字列表現を返す(
      #[case] value: JsonValue,
      #[case] expected: Option<&str>,
   ) {
      assert_eq!(coerce_text(&value).as_deref(), expected);
   }

   #[rstest]
   #[case("  {\"a\":1}  ", "{\"a\":1}")]
   #[case("\u{feff}{\"a\":1}", "{\"a\":1}")]
   #[case("  \u{feff} {\"a\":1}\r", "{\"a\":1}")]
   #[case("   ", "")]
   fn test_normalize_lineは空白とbomを除去する(#[case] line: &str, #[case] expected: &str) {
      assert_eq!(normalize_line(line), expected);
   }
}
