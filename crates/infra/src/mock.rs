//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! quizbank-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
   Arc,
   Mutex,
   atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use quizbank_domain::question::{Question, StoredRecord};

use crate::{
   error::InfraError,
   repository::{QuestionRepository, SkippedLine, StoreSnapshot},
};

/// インメモリの QuestionRepository
///
/// 読み込み・追記の失敗を注入でき、追記の呼び出し回数を記録する。
#[derive(Clone, Default)]
pub struct MockQuestionRepository {
   records:      Arc<Mutex<Vec<StoredRecord>>>,
   skipped:      Arc<Mutex<Vec<SkippedLine>>>,
   fail_read:    Arc<AtomicBool>,
   fail_append:  Arc<AtomicBool>,
   append_calls: Arc<AtomicUsize>,
}

impl MockQuestionRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn with_questions(questions: Vec<Question>) -> Self {
      Self::with_records(
         questions
            .iter()
            .map(|q| StoredRecord::from_question(q).unwrap())
            .collect(),
      )
   }

   /// 形の崩れた行を含むストアを再現する
   pub fn with_records(records: Vec<StoredRecord>) -> Self {
      let repo = Self::new();
      *repo.records.lock().unwrap() = records;
      repo
   }

   /// 読み飛ばし行を 1 件追加する
   pub fn add_skipped_line(&self, line_number: usize, reason: impl Into<String>) {
      self.skipped.lock().unwrap().push(SkippedLine {
         line_number,
         reason: reason.into(),
      });
   }

   pub fn fail_on_read(&self) {
      self.fail_read.store(true, Ordering::SeqCst);
   }

   pub fn fail_on_append(&self) {
      self.fail_append.store(true, Ordering::SeqCst);
   }

   /// 現在保持しているレコード（問題レコードとして読めるもののみ）
   pub fn questions(&self) -> Vec<Question> {
      self.records
         .lock()
         .unwrap()
         .iter()
         .filter_map(|r| r.to_question().ok())
         .collect()
   }

   /// `append` が呼ばれた回数
   pub fn append_calls(&self) -> usize {
      self.append_calls.load(Ordering::SeqCst)
   }
}

#[async_trait]
impl QuestionRepository for MockQuestionRepository {
   async fn read_all(&self) -> Result<StoreSnapshot, InfraError> {
      if self.fail_read.load(Ordering::SeqCst) {
         return Err(InfraError::unexpected("読み込み失敗（注入）"));
      }
      Ok(StoreSnapshot {
         records: self.records.lock().unwrap().clone(),
         skipped: self.skipped.lock().unwrap().clone(),
      })
   }

   async fn append(&self, questions: &[Question]) -> Result<(), InfraError> {
      self.append_calls.fetch_add(1, Ordering::SeqCst);
      if self.fail_append.load(Ordering::SeqCst) {
         return Err(InfraError::unexpected("書き込み失敗（注入）"));
      }
      let appended = questions
         .iter()
         .map(StoredRecord::from_question)
         .collect::<Result<Vec<_>, _>>()?;
      self.records.lock().unwrap().extend(appended);
      Ok(())
   }
}
