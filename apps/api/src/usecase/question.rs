//! 問題登録・取得ユースケース

use std::sync::Arc;

use quizbank_domain::{
   clock::Clock,
   question::{IdAllocator, Question, StoredRecord, parse_bulk_text, validate_question},
};
use quizbank_infra::repository::QuestionRepository;
use serde_json::Value as JsonValue;
use tokio::sync::Mutex;

use crate::error::ApiError;

/// 問題登録・取得ユースケース
pub struct QuestionUseCaseImpl {
   repository: Arc<dyn QuestionRepository>,
   clock:      Arc<dyn Clock>,
   /// 読み込み → 採番 → 追記 を直列化する
   write_lock: Mutex<()>,
}

impl QuestionUseCaseImpl {
   pub fn new(repository: Arc<dyn QuestionRepository>, clock: Arc<dyn Clock>) -> Self {
      Self {
         repository,
         clock,
         write_lock: Mutex::new(()),
      }
   }

   /// ストア上の全レコードをファイル順に取得する
   ///
   /// 外部編集で形の崩れたレコードも書かれたとおりに返す。
   pub async fn list_questions(&self) -> Result<Vec<StoredRecord>, ApiError> {
      let snapshot = self.repository.read_all().await?;
      Ok(snapshot.records)
   }

   /// 問題を 1 件登録する
   ///
   /// 1. 候補を検証（ロック取得前）
   /// 2. ストアを読み込み、`max(id) + 1` を採番
   /// 3. 1 行追記
   pub async fn create_question(&self, input: &JsonValue) -> Result<Question, ApiError> {
      let draft = validate_question(input).map_err(ApiError::InvalidQuestion)?;

      let _guard = self.write_lock.lock().await;
      let snapshot = self.repository.read_all().await?;
      let mut allocator = IdAllocator::starting_after(snapshot.ids());

      let question = Question::new(allocator.allocate()?, draft, None);
      self.repository
         .append(std::slice::from_ref(&question))
         .await?;

      tracing::info!(id = %question.id(), "問題を登録しました");
      Ok(question)
   }

   /// 一括テキストの問題をまとめて登録する
   ///
   /// すべての行の検証に成功した場合のみ、1 回の追記で書き込む。
   /// いずれかの行が失敗した場合はストアに一切触れない。
   pub async fn bulk_insert(&self, texto: &str) -> Result<Vec<Question>, ApiError> {
      let drafts = parse_bulk_text(texto)?;

      let _guard = self.write_lock.lock().await;
      let snapshot = self.repository.read_all().await?;
      let mut allocator = IdAllocator::starting_after(snapshot.ids());
      let created_at = self.clock.creation_timestamp();

      let batch = drafts
         .into_iter()
         .map(|draft| -> Result<Question, ApiError> {
            Ok(Question::new(allocator.allocate()?, draft, Some(created_at)))
         })
         .collect::<Result<Vec<_>, _>>()?;
      self.repository.append(&batch).await?;

      tracing::info!(count = batch.len(), "問題を一括登録しました");
      Ok(batch)
   }
}
