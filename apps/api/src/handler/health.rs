//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! {"status":"healthy","version":"0.1.0"}
//! ```
//!
//! API キー不要。ストアへのアクセスは行わない。

use axum::Json;
use quizbank_shared::HealthResponse;

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::healthy())
}
