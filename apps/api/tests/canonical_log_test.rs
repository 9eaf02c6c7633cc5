//! # リクエストログ統合テスト
//!
//! ルーター全体を通したリクエストが、本番と同じ JSON 形式で
//! canonical log line を 1 行残すことを検証する。

use std::sync::{Arc, Mutex};

use axum::{
   Router,
   body::Body,
   http::{Request, StatusCode},
};
use pretty_assertions::assert_eq;
use quizbank_api::{build_app, config::AppConfig, middleware::API_KEY_HEADER};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

const API_KEY: &str = "chave-de-teste";

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
   fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
   }

   fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
   }
}

impl<'a> MakeWriter<'a> for LogBuffer {
   type Writer = Self;

   fn make_writer(&'a self) -> Self::Writer {
      self.clone()
   }
}

impl LogBuffer {
   /// `log.type = canonical` の行のみ
   fn canonical_lines(&self) -> Vec<Value> {
      let bytes = self.0.lock().unwrap().clone();
      String::from_utf8(bytes)
         .unwrap()
         .lines()
         .map(|line| serde_json::from_str::<Value>(line).unwrap())
         .filter(|line| line["log.type"] == "canonical")
         .collect()
   }
}

fn setup() -> (TempDir, Router) {
   let dir = tempfile::tempdir().unwrap();
   let config = AppConfig {
      host:       "127.0.0.1".to_string(),
      port:       0,
      api_key:    API_KEY.to_string(),
      store_path: dir.path().join("perguntas.jsonl"),
   };
   let router = build_app(&config);
   (dir, router)
}

async fn send_logged(router: Router, request: Request<Body>) -> (StatusCode, Vec<Value>) {
   let buffer = LogBuffer::default();
   let subscriber = tracing_subscriber::fmt()
      .json()
      .flatten_event(true)
      .with_max_level(tracing::Level::INFO)
      .with_writer(buffer.clone())
      .finish();
   let _guard = tracing::subscriber::set_default(subscriber);

   let status = router.oneshot(request).await.unwrap().status();

   (status, buffer.canonical_lines())
}

#[tokio::test]
async fn test_apiキーで拒否されたリクエストもrequest_id付きで1行記録される() {
   let (_dir, router) = setup();
   let request = Request::builder()
      .uri("/perguntas")
      .header("x-request-id", "req-sem-chave")
      .body(Body::empty())
      .unwrap();

   let (status, lines) = send_logged(router, request).await;

   assert_eq!(status, StatusCode::FORBIDDEN);
   assert_eq!(lines.len(), 1);
   let line = &lines[0];
   assert_eq!(line["http.method"], "GET");
   assert_eq!(line["http.path"], "/perguntas");
   assert_eq!(line["http.status_code"], 403);
   assert_eq!(line["http.outcome"], "rejected");
   assert_eq!(line["span"]["request_id"], "req-sem-chave");
}

#[tokio::test]
async fn test_受け付けたリクエストはokとして記録される() {
   let (_dir, router) = setup();
   let request = Request::builder()
      .uri("/perguntas")
      .header(API_KEY_HEADER, API_KEY)
      .body(Body::empty())
      .unwrap();

   let (status, lines) = send_logged(router, request).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(lines.len(), 1);
   assert_eq!(lines[0]["http.status_code"], 200);
   assert_eq!(lines[0]["http.outcome"], "ok");
}
