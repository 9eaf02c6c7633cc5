//! # 問題バリデーター
//!
//! 型のない JSON 入力を検証し、ID 付与前の [`NewQuestion`] に変換する。
//! 単体登録・一括登録の両方がこの規則を共有する。
//!
//! ## 検証ルール（この順に評価し、最初の違反を返す）
//!
//! 1. 入力は JSON オブジェクトである
//! 2. `categoria`, `pergunta`, `opcoes`, `resposta` が存在し、null・空文字列ではない
//! 3. `opcoes` は 2 要素以上の配列で、各要素がテキスト化できる
//! 4. テキストフィールドはテキスト化できる（文字列・数値・真偽値）
//! 5. `resposta` の文字列表現が `opcoes` のいずれかの文字列表現と一致する

use serde_json::{Map, Value as JsonValue};

use crate::{QuestionValidationError, text::coerce_text};

/// 必須フィールド（検証順）
const REQUIRED_FIELDS: [&str; 4] = ["categoria", "pergunta", "opcoes", "resposta"];

/// `opcoes` の最小要素数
const MIN_OPTIONS: usize = 2;

/// 検証済み・ID 未付与の問題
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
   pub(super) categoria:  String,
   pub(super) pergunta:   String,
   pub(super) opcoes:     Vec<String>,
   pub(super) resposta:   String,
   pub(super) explicacao: Option<String>,
   pub(super) imagem:     Option<String>,
}

impl NewQuestion {
   pub fn categoria(&self) -> &str {
      &self.categoria
   }

   pub fn pergunta(&self) -> &str {
      &self.pergunta
   }

   pub fn opcoes(&self) -> &[String] {
      &self.opcoes
   }

   pub fn resposta(&self) -> &str {
      &self.resposta
   }
}

/// 候補レコードを検証する
pub fn validate_question(input: &JsonValue) -> Result<NewQuestion, QuestionValidationError> {
   let Some(object) = input.as_object() else {
      return Err(QuestionValidationError::NotAnObject);
   };

   for field in REQUIRED_FIELDS {
      if is_blank(object.get(field)) {
         return Err(QuestionValidationError::MissingField { field });
      }
   }

   let opcoes = options(object)?;
   let categoria = required_text(object, "categoria")?;
   let pergunta = required_text(object, "pergunta")?;
   let resposta = required_text(object, "resposta")?;
   let explicacao = optional_text(object, "explicacao")?;
   let imagem = optional_text(object, "imagem")?;

   if !opcoes.contains(&resposta) {
      return Err(QuestionValidationError::AnswerNotInOptions);
   }

   Ok(NewQuestion {
      categoria,
      pergunta,
      opcoes,
      resposta,
      explicacao,
      imagem,
   })
}

/// 欠落・null・空白のみの文字列を未入力とみなす
fn is_blank(value: Option<&JsonValue>) -> bool {
   match value {
      None | Some(JsonValue::Null) => true,
      Some(JsonValue::String(s)) => s.trim().is_empty(),
      Some(_) => false,
   }
}

fn options(object: &Map<String, JsonValue>) -> Result<Vec<String>, QuestionValidationError> {
   let Some(items) = object.get("opcoes").and_then(JsonValue::as_array) else {
      return Err(QuestionValidationError::InvalidOptions);
   };
   if items.len() < MIN_OPTIONS {
      return Err(QuestionValidationError::InvalidOptions);
   }

   items
      .iter()
      .map(|item| coerce_text(item).ok_or(QuestionValidationError::InvalidOptions))
      .collect()
}

fn required_text(
   object: &Map<String, JsonValue>,
   field: &'static str,
) -> Result<String, QuestionValidationError> {
   object
      .get(field)
      .and_then(coerce_text)
      .ok_or(QuestionValidationError::InvalidFieldType { field })
}

fn optional_text(
   object: &Map<String, JsonValue>,
   field: &'static str,
) -> Result<Option<String>, QuestionValidationError> {
   match object.get(field) {
      None | Some(JsonValue::Null) => Ok(None),
      Some(value) => coerce_text(value)
         .map(Some)
         .ok_or(QuestionValidationError::InvalidFieldType { field }),
   }
}
