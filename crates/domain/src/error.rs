//! # ドメイン層エラー定義
//!
//! 問題レコードの取り込みで発生するバリデーションエラーを表現する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `QuestionValidationError` | 400 Bad Request | 1 件の候補レコードの検証失敗 |
//! | `BulkParseError` | 400 Bad Request | 一括テキストのいずれかの行の失敗 |
//! | `IdExhaustedError` | 500 Internal Server Error | 採番できる ID が残っていない |
//!
//! 400 系のメッセージはクライアントにそのまま返すため、API の利用者向けの言語で記述する。

use thiserror::Error;

use crate::question::QuestionId;

/// 候補レコード 1 件のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionValidationError {
   /// 候補が JSON オブジェクトではない
   #[error("o registro deve ser um objeto JSON")]
   NotAnObject,

   /// 必須フィールドが欠落・null・空文字列
   #[error("campo obrigatório ausente: {field}")]
   MissingField {
      /// フィールド名
      field: &'static str,
   },

   /// テキストとして扱えない値（オブジェクト・配列など）
   #[error("campo '{field}' deve ser texto")]
   InvalidFieldType {
      /// フィールド名
      field: &'static str,
   },

   /// `opcoes` が配列でない、要素数が 2 未満、またはテキスト化できない要素を含む
   #[error("'opcoes' deve ser uma lista com pelo menos 2 itens")]
   InvalidOptions,

   /// `resposta` が `opcoes` のいずれとも一致しない
   #[error("'resposta' deve estar entre as 'opcoes'")]
   AnswerNotInOptions,
}

impl QuestionValidationError {
   /// 失敗の原因となったフィールド名
   pub fn field(&self) -> Option<&'static str> {
      match self {
         Self::NotAnObject => None,
         Self::MissingField { field } | Self::InvalidFieldType { field } => Some(field),
         Self::InvalidOptions => Some("opcoes"),
         Self::AnswerNotInOptions => Some("resposta"),
      }
   }

   /// 必須フィールドの欠落かどうか
   pub fn is_missing_field(&self) -> bool {
      matches!(self, Self::MissingField { .. })
   }
}

/// 一括テキストのパースエラー
///
/// 最初に失敗した行でパースを打ち切るため、常に 1 件のみ報告される。
/// 行番号は入力テキスト上の物理行（1 始まり、空行を含む）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkParseError {
   /// 空行を除くと 1 行も残らない
   #[error("Nenhuma pergunta encontrada no texto")]
   Empty,

   /// JSON オブジェクトとして解釈できない行
   #[error("Linha {line}: JSON inválido")]
   MalformedJson {
      /// 行番号
      line:   usize,
      /// パーサーが報告した理由（ログ用）
      reason: String,
   },

   /// JSON としては正しいが、バリデーションに失敗した行
   #[error("Linha {line}: {source}")]
   InvalidRecord {
      /// 行番号
      line:   usize,
      /// 失敗したルール
      #[source]
      source: QuestionValidationError,
   },
}

impl BulkParseError {
   /// 失敗した行番号
   pub fn line(&self) -> Option<usize> {
      match self {
         Self::Empty => None,
         Self::MalformedJson { line, .. } | Self::InvalidRecord { line, .. } => Some(*line),
      }
   }

   /// 失敗したフィールド名
   pub fn field(&self) -> Option<&'static str> {
      match self {
         Self::InvalidRecord { source, .. } => source.field(),
         _ => None,
      }
   }
}

/// 採番エラー
///
/// ストアに `u64::MAX` の ID が存在し、その次を払い出せない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ID {last} の次に採番できる ID がありません")]
pub struct IdExhaustedError {
   /// 最後に使われた ID
   pub last: QuestionId,
}
