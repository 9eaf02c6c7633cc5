//! # ストア上のレコード
//!
//! ストアの 1 行を JSON として解釈したもの。追記時の検証を経ていない行
//! （手作業での編集など）もそのまま保持し、一覧には書かれたとおりに返す。
//!
//! ID は採番の基準になるため寛容に読み取る。
//!
//! | `id` の値 | 読み取り結果 |
//! |-----------|--------------|
//! | `5` | 5 |
//! | `"5"`, `" 5 "` | 5 |
//! | `4.2`, `"4.2"` | 5（切り上げ） |
//! | 負数・真偽値・null・欠落・オブジェクト | なし |

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{Question, QuestionId};

/// ストアから読み戻した 1 行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredRecord(JsonValue);

impl StoredRecord {
   pub fn new(value: JsonValue) -> Self {
      Self(value)
   }

   /// 追記したレコードをストア上と同じ形で表現する
   pub fn from_question(question: &Question) -> Result<Self, serde_json::Error> {
      serde_json::to_value(question).map(Self)
   }

   pub fn as_json(&self) -> &JsonValue {
      &self.0
   }

   /// 採番の基準として数える ID
   pub fn id(&self) -> Option<QuestionId> {
      let id = match self.0.get("id")? {
         JsonValue::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(ceil_to_u64)),
         JsonValue::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
               .ok()
               .or_else(|| s.parse::<f64>().ok().and_then(ceil_to_u64))
         }
         _ => None,
      };
      id.map(QuestionId::new)
   }

   /// 形が整っていれば [`Question`] として読む
   pub fn to_question(&self) -> Result<Question, serde_json::Error> {
      Question::deserialize(&self.0)
   }
}

/// 非負の有限値を切り上げる（`u64` を超える値は上限に丸める）
fn ceil_to_u64(value: f64) -> Option<u64> {
   (value.is_finite() && value >= 0.0).then(|| value.ceil() as u64)
}
