//! # API エラー定義
//!
//! API で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | ApiError | HTTP Status | `erro` |
//! |----------|-------------|--------|
//! | InvalidApiKey | 403 | `Chave inválida` |
//! | InvalidQuestion | 400 | 欠落は `Campos inválidos`、それ以外はルールのメッセージ |
//! | Bulk | 400 | `Linha n: ...` など（`linha` 付き） |
//! | MissingBulkText | 400 | `Campo 'texto' é obrigatório` |
//! | InvalidBody | 400 | `Corpo da requisição inválido` |
//! | Store | 500 | `Erro interno`（詳細はログのみ） |
//! | IdExhausted | 500 | `Erro interno`（詳細はログのみ） |

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use quizbank_domain::{BulkParseError, IdExhaustedError, QuestionValidationError};
use quizbank_infra::InfraError;
use quizbank_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// `x-api-key` が欠落している、または一致しない
   #[error("Chave inválida")]
   InvalidApiKey,

   /// 単一登録の候補レコードが検証に失敗した
   #[error("{0}")]
   InvalidQuestion(QuestionValidationError),

   /// 一括テキストのいずれかの行が失敗した
   #[error(transparent)]
   Bulk(#[from] BulkParseError),

   /// 一括登録のリクエストに `texto` が無い
   #[error("Campo 'texto' é obrigatório")]
   MissingBulkText,

   /// リクエストボディが JSON として解釈できない
   #[error("Corpo da requisição inválido")]
   InvalidBody(String),

   /// ストアの読み書きに失敗した
   #[error("ストアエラー: {0}")]
   Store(#[from] InfraError),

   /// ストアの最大 ID が上限に達しており採番できない
   #[error(transparent)]
   IdExhausted(#[from] IdExhaustedError),
}

impl ApiError {
   fn status(&self) -> StatusCode {
      match self {
         Self::InvalidApiKey => StatusCode::FORBIDDEN,
         Self::InvalidQuestion(_)
         | Self::Bulk(_)
         | Self::MissingBulkText
         | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
         Self::Store(_) | Self::IdExhausted(_) => StatusCode::INTERNAL_SERVER_ERROR,
      }
   }

   fn to_body(&self) -> ErrorResponse {
      match self {
         Self::InvalidQuestion(e) if e.is_missing_field() => {
            ErrorResponse::new("Campos inválidos").with_campo(e.field().unwrap_or_default())
         }
         Self::InvalidQuestion(QuestionValidationError::NotAnObject) => {
            ErrorResponse::new("Campos inválidos")
         }
         Self::InvalidQuestion(e) => {
            let body = ErrorResponse::new(e.to_string());
            match e.field() {
               Some(field) => body.with_campo(field),
               None => body,
            }
         }
         Self::Bulk(e) => {
            let mut body = ErrorResponse::new(e.to_string());
            if let Some(line) = e.line() {
               body = body.with_linha(line);
            }
            if let Some(field) = e.field() {
               body = body.with_campo(field);
            }
            body
         }
         Self::MissingBulkText => ErrorResponse::new(self.to_string()).with_campo("texto"),
         Self::InvalidApiKey | Self::InvalidBody(_) => ErrorResponse::new(self.to_string()),
         Self::Store(_) | Self::IdExhausted(_) => ErrorResponse::internal_error(),
      }
   }
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      match &self {
         Self::Store(e) => {
            tracing::error!(
               error = %e,
               span_trace = %e.span_trace(),
               "ストアの読み書きに失敗しました"
            );
         }
         Self::IdExhausted(e) => {
            tracing::error!(last_id = %e.last, "採番できる ID が残っていません");
         }
         Self::InvalidBody(reason) => {
            tracing::debug!(%reason, "リクエストボディを解釈できません");
         }
         Self::Bulk(BulkParseError::MalformedJson { line, reason }) => {
            tracing::debug!(line, %reason, "一括テキストに不正な JSON 行があります");
         }
         _ => {}
      }

      (self.status(), Json(self.to_body())).into_response()
   }
}
