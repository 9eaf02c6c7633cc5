//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はトレーシング初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
   Router,
   middleware::from_fn_with_state,
   routing::{get, post},
};
use quizbank_domain::clock::{Clock, SystemClock};
use quizbank_infra::repository::{JsonlQuestionRepository, QuestionRepository};
use quizbank_shared::{
   canonical_log::CanonicalLogLineLayer,
   observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
   cors::CorsLayer,
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::{
   config::AppConfig,
   handler::{
      QuestionState,
      bulk_insert_questions,
      create_question,
      health_check,
      list_questions,
   },
   middleware::{ApiKeyState, require_api_key},
   usecase::QuestionUseCaseImpl,
};

/// 設定から依存を組み立て、ルーターを構築する
pub fn build_app(config: &AppConfig) -> Router {
   let repository: Arc<dyn QuestionRepository> =
      Arc::new(JsonlQuestionRepository::new(config.store_path.clone()));
   let clock: Arc<dyn Clock> = Arc::new(SystemClock);

   let question_state = Arc::new(QuestionState {
      usecase: QuestionUseCaseImpl::new(repository, clock),
   });

   build_router(question_state, ApiKeyState::new(config.api_key.as_str()))
}

/// 組み立て済みの State からルーターを構築する
pub fn build_router(question_state: Arc<QuestionState>, api_key_state: ApiKeyState) -> Router {
   Router::new()
      .route("/perguntas", get(list_questions).post(create_question))
      .route("/perguntas/bulk", post(bulk_insert_questions))
      .with_state(question_state)
      .route("/health", get(health_check))
      // layer: 存在しないパスを含むすべてのリクエストで API キーを要求する（`/health` を除く）
      .layer(from_fn_with_state(api_key_state, require_api_key))
      .layer(CorsLayer::permissive())
      // 下に書いたものが外側
      // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
      // 2. TraceLayer: スパンに request_id を含める
      // 3. CanonicalLogLineLayer: リクエスト完了時に 1 行サマリログを出力
      // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(CanonicalLogLineLayer)
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
