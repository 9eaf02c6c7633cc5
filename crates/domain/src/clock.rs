//! # Clock（時刻プロバイダ）
//!
//! 一括登録で付与する `criadaEm` の時刻源。テストでは固定時刻を注入する。
//!
//! `criadaEm` はミリ秒精度に切り捨てて記録する（`2026-10-16T09:00:00.123Z`）。
//! システム時刻のナノ秒まではストアに書き込まない。

use chrono::{DateTime, SubsecRound, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;

   /// `criadaEm` に記録する時刻
   fn creation_timestamp(&self) -> DateTime<Utc> {
      self.now().trunc_subsecs(3)
   }
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻を返すテスト用実装
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}
