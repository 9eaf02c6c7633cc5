//! # 一括テキストのパース
//!
//! 1 行 1 JSON オブジェクトのテキストを分割・検証する。
//!
//! - 各行は前後の空白と BOM を除去してから解釈する
//! - 空行は読み飛ばす
//! - いずれかの行が失敗した時点で全体を失敗とする（部分的な結果は返さない）

use serde_json::Value as JsonValue;

use super::{NewQuestion, validate_question};
use crate::{BulkParseError, QuestionValidationError, text::normalize_line};

/// 一括テキストを検証済みの入力に変換する（入力順）
pub fn parse_bulk_text(texto: &str) -> Result<Vec<NewQuestion>, BulkParseError> {
   let mut drafts = Vec::new();

   for (index, raw) in texto.lines().enumerate() {
      let line_number = index + 1;
      let line = normalize_line(raw);
      if line.is_empty() {
         continue;
      }

      let value: JsonValue =
         serde_json::from_str(line).map_err(|e| BulkParseError::MalformedJson {
            line:   line_number,
            reason: e.to_string(),
         })?;

      let question = validate_question(&value).map_err(|source| match source {
         QuestionValidationError::NotAnObject => BulkParseError::MalformedJson {
            line:   line_number,
            reason: source.to_string(),
         },
         source => BulkParseError::InvalidRecord {
            line: line_number,
            source,
         },
      })?;

      drafts.push(question);
   }

   if drafts.is_empty() {
      return Err(BulkParseError::Empty);
   }

   Ok(drafts)
}
