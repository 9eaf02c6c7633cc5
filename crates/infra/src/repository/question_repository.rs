//! # QuestionRepository
//!
//! 問題レコードの永続化を担当するリポジトリ。
//!
//! ## ストア形式
//!
//! - UTF-8 テキスト、1 行に 1 つの JSON オブジェクト（配列で囲まない、整形しない）
//! - 追記専用。既存の内容を書き換えることはない
//! - ファイルが存在しない状態は空のストアと同じ
//!
//! ## 読み込み時の耐性
//!
//! 途中で中断された追記や外部編集で JSON として解釈できなくなった行は、読み飛ばして
//! [`SkippedLine`] として呼び出し元に返す（同時に WARN ログを出力する）。
//! リクエスト自体は失敗させない。
//!
//! JSON として正しい行は、問題レコードの形をしていなくても [`StoredRecord`] として
//! 保持する（`"id": "5"`、`id` の欠落、`opcoes` 内の null など）。
//! 一覧にはそのまま現れ、読み取れる `id` は採番の基準に含まれる。

use std::{
   io::{ErrorKind, SeekFrom},
   path::{Path, PathBuf},
};

use async_trait::async_trait;
use quizbank_domain::{
   question::{Question, QuestionId, StoredRecord},
   text::normalize_line,
};
use serde_json::Value as JsonValue;
use tokio::{
   fs::{File, OpenOptions},
   io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};

use crate::error::InfraError;

/// ストア全体の読み込み結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
   /// JSON として解釈できた行（ファイル順 = 古い順）
   pub records: Vec<StoredRecord>,
   /// 読み飛ばした行
   pub skipped: Vec<SkippedLine>,
}

impl StoreSnapshot {
   /// 採番の基準として数える ID
   pub fn ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
      self.records.iter().filter_map(StoredRecord::id)
   }
}

/// 読み飛ばした行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
   /// ファイル上の行番号（1 始まり）
   pub line_number: usize,
   /// 読み飛ばした理由
   pub reason:      String,
}

/// 問題リポジトリトレイト
#[async_trait]
pub trait QuestionRepository: Send + Sync {
   /// ストア全体を読み込む
   async fn read_all(&self) -> Result<StoreSnapshot, InfraError>;

   /// レコードを 1 回の書き込みで末尾に追記する
   ///
   /// 空のスライスを渡した場合は何もしない。
   async fn append(&self, questions: &[Question]) -> Result<(), InfraError>;
}

/// JSONL ファイル実装の QuestionRepository
#[derive(Debug, Clone)]
pub struct JsonlQuestionRepository {
   path: PathBuf,
}

impl JsonlQuestionRepository {
   /// 新しいリポジトリインスタンスを作成（ファイルは最初の追記時に作成される）
   pub fn new(path: impl Into<PathBuf>) -> Self {
      Self { path: path.into() }
   }

   pub fn path(&self) -> &Path {
      &self.path
   }
}

#[async_trait]
impl QuestionRepository for JsonlQuestionRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(path = %self.path.display()))]
   async fn read_all(&self) -> Result<StoreSnapshot, InfraError> {
      let bytes = match tokio::fs::read(&self.path).await {
         Ok(bytes) => bytes,
         Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreSnapshot::default()),
         Err(e) => return Err(e.into()),
      };

      let snapshot = parse_store(&bytes);
      for skipped in &snapshot.skipped {
         tracing::warn!(
            line = skipped.line_number,
            reason = %skipped.reason,
            "ストアの不正な行を読み飛ばしました"
         );
      }

      Ok(snapshot)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(path = %self.path.display(), count = questions.len()))]
   async fn append(&self, questions: &[Question]) -> Result<(), InfraError> {
      if questions.is_empty() {
         return Ok(());
      }

      let mut batch = String::new();
      if ends_without_newline(&self.path).await? {
         batch.push('\n');
      }
      for question in questions {
         batch.push_str(&serde_json::to_string(question)?);
         batch.push('\n');
      }

      let mut file = OpenOptions::new()
         .create(true)
         .append(true)
         .open(&self.path)
         .await?;
      file.write_all(batch.as_bytes()).await?;
      file.flush().await?;

      Ok(())
   }
}

/// ストアのバイト列をレコード列に復元する
///
/// 空行は黙って読み飛ばし、UTF-8 / JSON として解釈できない行は
/// [`SkippedLine`] に記録する。形の検証は行わない。
fn parse_store(bytes: &[u8]) -> StoreSnapshot {
   let mut snapshot = StoreSnapshot::default();

   for (index, raw) in bytes.split(|b| *b == b'\n').enumerate() {
      let line_number = index + 1;

      let text = match std::str::from_utf8(raw) {
         Ok(text) => text,
         Err(e) => {
            snapshot.skipped.push(SkippedLine {
               line_number,
               reason: format!("UTF-8 として不正です: {e}"),
            });
            continue;
         }
      };

      let line = normalize_line(text);
      if line.is_empty() {
         continue;
      }

      match serde_json::from_str::<JsonValue>(line) {
         Ok(value) => snapshot.records.push(StoredRecord::new(value)),
         Err(e) => snapshot.skipped.push(SkippedLine {
            line_number,
            reason: e.to_string(),
         }),
      }
   }

   snapshot
}

/// 既存のストアが改行で終わっていないか
///
/// 外部編集で末尾の改行が失われていると、追記したレコードが最終行に連結されてしまう。
async fn ends_without_newline(path: &Path) -> Result<bool, InfraError> {
   let mut file = match File::open(path).await {
      Ok(file) => file,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
      Err(e) => return Err(e.into()),
   };

   if file.metadata().await?.len() == 0 {
      return Ok(false);
   }

   file.seek(SeekFrom::End(-1)).await?;
   let mut last = [0u8; 1];
   file.read_exact(&mut last).await?;

   Ok(last[0] != b'\n')
}
