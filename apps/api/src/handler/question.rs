//! # 問題ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /perguntas` - 全問題をファイル順に取得
//! - `POST /perguntas` - 問題を 1 件登録
//! - `POST /perguntas/bulk` - 1 行 1 JSON のテキストから一括登録
//!
//! ボディが JSON として解釈できない場合も、axum 既定のレスポンスではなく
//! `{erro}` 形式の 400 を返す。

use std::sync::Arc;

use axum::{
   Json,
   extract::{State, rejection::JsonRejection},
   http::StatusCode,
   response::IntoResponse,
};
use quizbank_domain::question::Question;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{error::ApiError, usecase::QuestionUseCaseImpl};

/// 問題 API の共有状態
pub struct QuestionState {
   pub usecase: QuestionUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 一括登録リクエスト
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkInsertRequest {
   pub texto: String,
}

/// 一括登録レスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkInsertResponse {
   pub mensagem:       String,
   pub total_inserido: usize,
   pub inseridas:      Vec<Question>,
}

impl BulkInsertResponse {
   fn new(inseridas: Vec<Question>) -> Self {
      Self {
         mensagem: format!("{} perguntas inseridas com sucesso", inseridas.len()),
         total_inserido: inseridas.len(),
         inseridas,
      }
   }
}

fn json_body(body: Result<Json<JsonValue>, JsonRejection>) -> Result<JsonValue, ApiError> {
   body.map(|Json(value)| value)
      .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

// --- ハンドラ ---

/// GET /perguntas
#[tracing::instrument(skip_all)]
pub async fn list_questions(
   State(state): State<Arc<QuestionState>>,
) -> Result<impl IntoResponse, ApiError> {
   let questions = state.usecase.list_questions().await?;
   Ok((StatusCode::OK, Json(questions)))
}

/// POST /perguntas
///
/// ## レスポンス
///
/// - `201 Created`: ID が付与された問題
/// - `400 Bad Request`: 必須フィールドの欠落（`Campos inválidos`）、形状エラー
#[tracing::instrument(skip_all)]
pub async fn create_question(
   State(state): State<Arc<QuestionState>>,
   body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
   let input = json_body(body)?;

   let question = state.usecase.create_question(&input).await?;

   Ok((StatusCode::CREATED, Json(question)))
}

/// POST /perguntas/bulk
///
/// ## レスポンス
///
/// - `201 Created`: 件数と登録された問題の一覧
/// - `400 Bad Request`: `texto` の欠落、空のテキスト、いずれかの行の失敗（`linha` 付き）
#[tracing::instrument(skip_all)]
pub async fn bulk_insert_questions(
   State(state): State<Arc<QuestionState>>,
   body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
   let input = json_body(body)?;
   let request: BulkInsertRequest =
      serde_json::from_value(input).map_err(|_| ApiError::MissingBulkText)?;

   let inseridas = state.usecase.bulk_insert(&request.texto).await?;

   Ok((StatusCode::CREATED, Json(BulkInsertResponse::new(inseridas))))
}
