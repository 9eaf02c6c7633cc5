//! # ID 採番
//!
//! 既存レコードの最大 ID の次から連番で採番する。
//! 外部でレコードが削除されても ID を再利用しないよう、件数ではなく最大値を基準にする。

use super::QuestionId;
use crate::IdExhaustedError;

/// バッチ単位の ID 採番器
#[derive(Debug, Clone)]
pub struct IdAllocator {
   next: Result<QuestionId, IdExhaustedError>,
}

impl IdAllocator {
   /// 既存 ID の `max + 1` から採番を開始する（空なら 1）
   pub fn starting_after(existing: impl IntoIterator<Item = QuestionId>) -> Self {
      let next = match existing.into_iter().max() {
         None => Ok(QuestionId::FIRST),
         Some(last) => last.next().ok_or(IdExhaustedError { last }),
      };
      Self { next }
   }

   /// ID を 1 つ払い出す
   pub fn allocate(&mut self) -> Result<QuestionId, IdExhaustedError> {
      let id = self.next.clone()?;
      self.next = id.next().ok_or(IdExhaustedError { last: id });
      Ok(id)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   fn ids(values: &[u64]) -> Vec<QuestionId> {
      values.iter().copied().map(QuestionId::new).collect()
   }

   #[test]
   fn test_空のストアでは1から採番する() {
      let mut sut = IdAllocator::starting_after([]);

      assert_eq!(sut.allocate(), Ok(QuestionId::new(1)));
      assert_eq!(sut.allocate(), Ok(QuestionId::new(2)));
   }

   #[test]
   fn test_最大idの次から連番で採番する() {
      let mut sut = IdAllocator::starting_after(ids(&[1, 2, 3]));

      let allocated: Vec<_> = (0..3).map(|_| sut.allocate().unwrap().as_u64()).collect();

      assert_eq!(allocated, vec![4, 5, 6]);
   }

   #[test]
   fn test_欠番があっても件数ではなく最大値を基準にする() {
      // 2 件しかないが最大 ID は 10
      let mut sut = IdAllocator::starting_after(ids(&[10, 3]));

      assert_eq!(sut.allocate(), Ok(QuestionId::new(11)));
   }

   #[test]
   fn test_最大idがu64の上限なら採番できない() {
      let mut sut = IdAllocator::starting_after(ids(&[7, u64::MAX]));

      assert_eq!(
         sut.allocate(),
         Err(IdExhaustedError {
            last: QuestionId::new(u64::MAX),
         })
      );
   }

   #[test]
   fn test_上限の直前から採番すると上限を払い出した後に失敗する() {
      let mut sut = IdAllocator::starting_after(ids(&[u64::MAX - 1]));

      assert_eq!(sut.allocate(), Ok(QuestionId::new(u64::MAX)));
      assert!(sut.allocate().is_err());
   }
}
