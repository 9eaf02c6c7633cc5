//! # リポジトリ実装
//!
//! 問題ストアへのアクセスをトレイトで抽象化し、JSONL ファイル実装を提供する。
//!
//! ## 設計方針
//!
//! - **トレイト経由**: ユースケースは `Arc<dyn QuestionRepository>` に依存し、
//!   テストではインメモリ実装に差し替える
//! - **キャッシュなし**: すべての操作がファイル全体を読み直す。ファイルが唯一の正

pub mod question_repository;

pub use question_repository::{
   JsonlQuestionRepository,
   QuestionRepository,
   SkippedLine,
   StoreSnapshot,
};
