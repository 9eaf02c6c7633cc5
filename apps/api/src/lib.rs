//! # QuizBank API サーバー
//!
//! クイズ問題を JSONL ファイルに蓄積し、HTTP で登録・取得する API。
//!
//! ```text
//! Client ──x-api-key──▶ handler ──▶ usecase ──▶ QuestionRepository ──▶ perguntas.jsonl
//!                                     │
//!                                     └─ Validator / IdAllocator（domain）
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - State の初期化とルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - API キー検証
//! - [`usecase`] - 登録・取得のオーケストレーション

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;

pub use app_builder::{build_app, build_router};
