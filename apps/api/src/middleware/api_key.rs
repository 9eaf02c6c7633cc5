//! # API キー検証ミドルウェア
//!
//! `x-api-key` ヘッダーを共有シークレットと照合する。
//! 欠落・不一致はいずれも 403 `{erro: "Chave inválida"}` を返し、ハンドラには到達しない。
//!
//! ルーター全体に適用するため、存在しないパスもキーが無ければ 404 ではなく 403 になる。
//! `/health` のみ検証しない。

use std::sync::Arc;

use axum::{
   body::Body,
   extract::State,
   http::Request,
   middleware::Next,
   response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::error::ApiError;

/// API キーを運ぶヘッダー名
pub const API_KEY_HEADER: &str = "x-api-key";

/// API キー検証をスキップするパス
const API_KEY_SKIP_PATHS: &[&str] = &["/health"];

/// API キー検証の状態
#[derive(Clone)]
pub struct ApiKeyState {
   expected: Arc<str>,
}

impl ApiKeyState {
   pub fn new(expected: impl Into<Arc<str>>) -> Self {
      Self {
         expected: expected.into(),
      }
   }

   /// 提示されたキーが一致するか（定数時間比較）
   fn accepts(&self, provided: &[u8]) -> bool {
      self.expected.as_bytes().ct_eq(provided).into()
   }
}

/// API キー検証をスキップするパスかどうか
fn should_skip_api_key(path: &str) -> bool {
   API_KEY_SKIP_PATHS.contains(&path)
}

/// API キー検証ミドルウェア
pub async fn require_api_key(
   State(state): State<ApiKeyState>,
   request: Request<Body>,
   next: Next,
) -> Response {
   if should_skip_api_key(request.uri().path()) {
      return next.run(request).await;
   }

   let accepted = request
      .headers()
      .get(API_KEY_HEADER)
      .is_some_and(|value| state.accepts(value.as_bytes()));

   if !accepted {
      tracing::debug!(path = %request.uri().path(), "API キーが無効なリクエストを拒否しました");
      return ApiError::InvalidApiKey.into_response();
   }

   next.run(request).await
}
