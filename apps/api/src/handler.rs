//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//! 各ハンドラはサブモジュールに配置し、ここで re-export する。

pub mod health;
pub mod question;

pub use health::health_check;
pub use question::{
   BulkInsertRequest,
   BulkInsertResponse,
   QuestionState,
   bulk_insert_questions,
   create_question,
   list_questions,
};
