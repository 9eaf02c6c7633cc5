//! # ミドルウェア
//!
//! API 用のミドルウェアを提供する。

mod api_key;

pub use api_key::{API_KEY_HEADER, ApiKeyState, require_api_key};
