//! # QuizBank API サーバー
//!
//! ## 起動方法
//!
//! ```bash
//! API_KEY=segredo PERGUNTAS_FILE=./perguntas.jsonl cargo run -p quizbank-api
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use quizbank_api::{build_app, config::AppConfig};
use quizbank_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   init_tracing(TracingConfig::from_env("quizbank-api"));
   let _tracing_guard = tracing::info_span!("app", service = "quizbank-api").entered();

   let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;
   if config.uses_default_api_key() {
      tracing::warn!("API_KEY が未設定のため、開発用のデフォルトキーを使用します");
   }

   let app = build_app(&config);

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;
   let listener = TcpListener::bind(addr).await?;
   tracing::info!(
      %addr,
      store = %config.store_path.display(),
      "QuizBank API サーバーを起動しました"
   );

   axum::serve(listener, app).await?;

   Ok(())
}
