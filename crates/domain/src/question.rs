//! # 問題レコード
//!
//! クイズ問題 1 件を表現するドメインモデル。ストア上の 1 行と API の
//! レスポンス要素は同じ JSON 形状を持つ。
//!
//! ## ライフサイクル
//!
//! ```text
//! 任意の JSON ──validate_question──▶ NewQuestion ──Question::new(id)──▶ Question
//! ```
//!
//! レコードは追記操作でのみ生成され、書き込み後は不変。更新・削除の操作は存在しない。
//! ストアから読み戻した行は外部編集で形が崩れている可能性があるため、
//! [`Question`] ではなく [`StoredRecord`] として扱う。
//!
//! ## JSON 形状
//!
//! ```json
//! {
//!   "id": 1,
//!   "categoria": "Geral",
//!   "pergunta": "Qual é a capital do Brasil?",
//!   "opcoes": ["Rio de Janeiro", "Brasília", "São Paulo"],
//!   "resposta": "Brasília",
//!   "explicacao": null,
//!   "imagem": null,
//!   "criadaEm": "2026-10-16T09:00:00Z"
//! }
//! ```
//!
//! `criadaEm` は一括登録でのみ付与され、未設定の場合はキーごと省略される。

mod bulk;
mod id_allocator;
mod stored;
mod validator;

use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

pub use self::{
   bulk::parse_bulk_text,
   id_allocator::IdAllocator,
   stored::StoredRecord,
   validator::{NewQuestion, validate_question},
};
use crate::text;

/// 問題 ID
///
/// ストア内で一意な正の整数。書き込み時に単調増加で採番され、再利用・振り直しはしない。
#[derive(
   Debug,
   Clone,
   Copy,
   PartialEq,
   Eq,
   PartialOrd,
   Ord,
   Hash,
   Serialize,
   Deserialize,
   Display,
   From
)]
#[serde(transparent)]
pub struct QuestionId(u64);

impl QuestionId {
   /// 空のストアで最初に採番される ID
   pub const FIRST: Self = Self(1);

   pub fn new(value: u64) -> Self {
      Self(value)
   }

   pub fn as_u64(&self) -> u64 {
      self.0
   }

   /// 次の ID（`u64::MAX` の次は存在しない）
   pub fn next(self) -> Option<Self> {
      self.0.checked_add(1).map(Self)
   }
}

/// 問題レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
   id:         QuestionId,
   #[serde(deserialize_with = "text::deserialize_text")]
   categoria:  String,
   #[serde(deserialize_with = "text::deserialize_text")]
   pergunta:   String,
   #[serde(deserialize_with = "text::deserialize_text_list")]
   opcoes:     Vec<String>,
   #[serde(deserialize_with = "text::deserialize_text")]
   resposta:   String,
   #[serde(default, deserialize_with = "text::deserialize_optional_text")]
   explicacao: Option<String>,
   #[serde(default, deserialize_with = "text::deserialize_optional_text")]
   imagem:     Option<String>,
   #[serde(
      rename = "criadaEm",
      default,
      skip_serializing_if = "Option::is_none"
   )]
   criada_em:  Option<DateTime<Utc>>,
}

impl Question {
   /// 検証済みの入力に ID を付与してレコードを生成する
   pub fn new(id: QuestionId, draft: NewQuestion, criada_em: Option<DateTime<Utc>>) -> Self {
      let NewQuestion {
         categoria,
         pergunta,
         opcoes,
         resposta,
         explicacao,
         imagem,
      } = draft;

      Self {
         id,
         categoria,
         pergunta,
         opcoes,
         resposta,
         explicacao,
         imagem,
         criada_em,
      }
   }

   pub fn id(&self) -> QuestionId {
      self.id
   }

   pub fn categoria(&self) -> &str {
      &self.categoria
   }

   pub fn pergunta(&self) -> &str {
      &self.pergunta
   }

   pub fn opcoes(&self) -> &[String] {
      &self.opcoes
   }

   pub fn resposta(&self) -> &str {
      &self.resposta
   }

   pub fn explicacao(&self) -> Option<&str> {
      self.explicacao.as_deref()
   }

   pub fn imagem(&self) -> Option<&str> {
      self.imagem.as_deref()
   }

   pub fn criada_em(&self) -> Option<DateTime<Utc>> {
      self.criada_em
   }
}
