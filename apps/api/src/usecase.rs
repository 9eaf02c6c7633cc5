//! # ユースケース層
//!
//! 問題バンクの登録・取得を組み立てる。
//!
//! - **依存性注入**: リポジトリと時刻を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入出力の変換のみを行い、ロジックはここに集約

pub mod question;

pub use question::QuestionUseCaseImpl;
