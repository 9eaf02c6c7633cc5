//! # QuizBank ドメイン層
//!
//! クイズ問題ストアのドメインモデルと、取り込みパイプラインの純粋ロジックを定義する。
//!
//! ## 設計方針
//!
//! - **I/O を持たない**: ファイル読み書きはインフラ層に委ね、ここでは
//!   パース・バリデーション・ID 採番のみを扱う
//! - **型による保証**: バリデーションを通過した入力のみが [`question::NewQuestion`]
//!   として表現され、ID 付与後に [`question::Question`] となる
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`question`] - 問題レコード、ストア上の生レコード、バリデーター、ID 採番、一括テキストのパース
//! - [`text`] - 文字列への強制変換と行の正規化
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - バリデーションエラーと採番エラー
//!
//! ## 使用例
//!
//! ```rust
//! use quizbank_domain::question::{IdAllocator, Question, validate_question};
//!
//! let input = serde_json::json!({
//!     "categoria": "Geral",
//!     "pergunta": "Qual é a capital do Brasil?",
//!     "opcoes": ["Rio de Janeiro", "Brasília", "São Paulo"],
//!     "resposta": "Brasília"
//! });
//! let draft = validate_question(&input).unwrap();
//!
//! let mut allocator = IdAllocator::starting_after([]);
//! let question = Question::new(allocator.allocate().unwrap(), draft, None);
//! assert_eq!(question.id().as_u64(), 1);
//! ```

pub mod clock;
pub mod error;
pub mod question;
pub mod text;

pub use error::{BulkParseError, IdExhaustedError, QuestionValidationError};
