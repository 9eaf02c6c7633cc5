//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `PORT` | No | `3000` | ポート番号 |
//! | `API_KEY` | No | `SUA_CHAVE_SECRETA_AQUI` | `x-api-key` ヘッダーと照合する共有シークレット |
//! | `PERGUNTAS_FILE` | No | `perguntas.jsonl` | 問題ストア（JSONL）のパス |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! ```

use std::{env, num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// `API_KEY` 未設定時に使用する開発用の共有シークレット
pub const DEFAULT_API_KEY: &str = "SUA_CHAVE_SECRETA_AQUI";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORE_PATH: &str = "perguntas.jsonl";

/// 設定の読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
   #[error("PORT は有効なポート番号である必要があります: {value}")]
   InvalidPort {
      value:  String,
      #[source]
      source: ParseIntError,
   },

   #[error("API_KEY に空文字列は指定できません")]
   EmptyApiKey,
}

/// API サーバーの設定
///
/// 起動時に一度だけ構築し、ルーター構築に渡す。
#[derive(Clone)]
pub struct AppConfig {
   /// バインドアドレス
   pub host:       String,
   /// ポート番号
   pub port:       u16,
   /// `x-api-key` と照合する共有シークレット
   pub api_key:    String,
   /// 問題ストアのパス
   pub store_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.debug_struct("AppConfig")
         .field("host", &self.host)
         .field("port", &self.port)
         .field("api_key", &"***")
         .field("store_path", &self.store_path)
         .finish()
   }
}

impl AppConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|key| env::var(key).ok())
   }

   /// 任意のキー参照関数から設定を組み立てる
   ///
   /// 未設定・空文字列の変数はデフォルト値を使う（`API_KEY` を除く）。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

      let port = match non_empty("PORT") {
         Some(value) => value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidPort { value, source })?,
         None => DEFAULT_PORT,
      };

      let api_key = match lookup("API_KEY") {
         Some(key) if key.is_empty() => return Err(ConfigError::EmptyApiKey),
         Some(key) => key,
         None => DEFAULT_API_KEY.to_string(),
      };

      Ok(Self {
         host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
         port,
         api_key,
         store_path: non_empty("PERGUNTAS_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from),
      })
   }

   /// 開発用のデフォルト API キーのまま起動しようとしているか
   pub fn uses_default_api_key(&self) -> bool {
      self.api_key == DEFAULT_API_KEY
   }
}
