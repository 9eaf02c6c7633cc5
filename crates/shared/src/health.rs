//! # ヘルスチェック共通型

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// `status` はサービスの稼働状態、`version` は Cargo.toml のバージョンを示す。
///
/// ## 使用例
///
/// ```
/// use quizbank_shared::HealthResponse;
///
/// let response = HealthResponse::healthy();
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
   /// 稼働状態（`"healthy"` または `"unhealthy"`）
   pub status:  String,
   /// アプリケーションバージョン
   pub version: String,
}

impl HealthResponse {
   /// 稼働中を示すレスポンスを作成する
   pub fn healthy() -> Self {
      Self {
         status:  "healthy".to_string(),
         version: env!("CARGO_PKG_VERSION").to_string(),
      }
   }
}
