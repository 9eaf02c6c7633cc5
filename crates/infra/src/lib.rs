//! # QuizBank インフラ層
//!
//! 問題ストア（1 行 1 JSON の追記専用ファイル）への読み書きを担当する。
//!
//! ## 責務
//!
//! - **Reader**: ストア全体を読み込み、壊れた行を読み飛ばしつつレコード列を復元する
//! - **Writer**: 検証・採番済みのレコードを 1 回の追記で末尾に書き込む
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと JSONL ファイル実装
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
