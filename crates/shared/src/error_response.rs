//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - クライアントが機械的に判定できるよう、形状は常に `{ "erro": "..." }` に固定する
//! - 一括登録のバリデーション失敗では、失敗した行番号（`linha`）と
//!   フィールド名（`campo`）を任意で付加する
//! - axum の `IntoResponse` 変換は各アプリの責務（shared に axum 依存を入れない）

use serde::{Deserialize, Serialize};

/// 内部エラー時に返す固定メッセージ
const INTERNAL_ERROR_MESSAGE: &str = "Erro interno";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   /// エラーメッセージ
   pub erro:  String,
   /// 失敗した入力行（1 始まり）
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub linha: Option<usize>,
   /// 失敗したフィールド名
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub campo: Option<String>,
}

impl ErrorResponse {
   /// メッセージのみのエラーレスポンスを作成する
   pub fn new(erro: impl Into<String>) -> Self {
      Self {
         erro:  erro.into(),
         linha: None,
         campo: None,
      }
   }

   /// 失敗した行番号を付加する
   pub fn with_linha(mut self, linha: usize) -> Self {
      self.linha = Some(linha);
      self
   }

   /// 失敗したフィールド名を付加する
   pub fn with_campo(mut self, campo: impl Into<String>) -> Self {
      self.campo = Some(campo.into());
      self
   }

   /// 500 Internal Server Error
   ///
   /// メッセージは固定値（内部情報を漏らさないため）。
   pub fn internal_error() -> Self {
      Self::new(INTERNAL_ERROR_MESSAGE)
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_newでerroのみのjsonになる() {
      let error = ErrorResponse::new("Chave inválida");
      let json = serde_json::to_value(&error).unwrap();

      assert_eq!(json, serde_json::json!({ "erro": "Chave inválida" }));
   }

   #[test]
   fn test_行番号とフィールド名が付加される() {
      let error = ErrorResponse::new("Linha 3: campo obrigatório ausente: pergunta")
         .with_linha(3)
         .with_campo("pergunta");
      let json = serde_json::to_value(&error).unwrap();

      assert_eq!(json["linha"], 3);
      assert_eq!(json["campo"], "pergunta");
   }

   #[test]
   fn test_internal_errorは固定メッセージを返す() {
      assert_eq!(ErrorResponse::internal_error().erro, "Erro interno");
   }

   #[test]
   fn test_任意フィールドが無いjsonをデシリアライズできる() {
      let error: ErrorResponse = serde_json::from_str(r#"{"erro": "x"}"#).unwrap();

      assert_eq!(error, ErrorResponse::new("x"));
   }
}
