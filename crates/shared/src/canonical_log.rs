//! # Canonical Log Line ミドルウェア
//!
//! HTTP リクエスト完了時に、メソッド・パス・ステータス・レイテンシと結果の分類を
//! 1 行に集約したサマリログを出力する tower Layer。
//!
//! ## 結果の分類（`http.outcome`）
//!
//! | ステータス | 分類 | レベル |
//! |------------|------|--------|
//! | 2xx / 3xx | `ok` | INFO |
//! | 401 / 403 | `rejected` | INFO |
//! | その他の 4xx | `invalid` | INFO |
//! | 5xx | `failed` | WARN |
//!
//! API キーで拒否されたリクエストも `rejected` として 1 行残る。
//! 5xx の詳細はハンドラ側の ERROR ログに出力済みのため、ここではサマリのみ。
//!
//! ## レイヤー配置
//!
//! TraceLayer のスパン内に配置し、スパンフィールド（request_id 等）を
//! JSON ログに含める:
//!
//! ```text
//! SetRequestId → TraceLayer → CanonicalLogLineLayer → API キー検証 → handler
//! ```

use std::{
   future::Future,
   pin::Pin,
   task::{Context, Poll},
   time::Instant,
};

use http::{Request, Response, StatusCode};
use tower::{Layer, Service};

/// 監視系から高頻度で叩かれるため出力しない
fn is_health_check_path(path: &str) -> bool {
   path == "/health"
}

/// ステータスコードを集計用の分類に変換する
fn outcome(status: StatusCode) -> &'static str {
   match status.as_u16() {
      401 | 403 => "rejected",
      400..=499 => "invalid",
      500..=599 => "failed",
      _ => "ok",
   }
}

/// Canonical Log Line を出力する Layer
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
   type Service = CanonicalLogLineService<S>;

   fn layer(&self, inner: S) -> Self::Service {
      CanonicalLogLineService { inner }
   }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
   inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
   S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
   S::Future: Send + 'static,
   S::Error: std::fmt::Display + 'static,
   ReqBody: Send + 'static,
   ResBody: Send + 'static,
{
   type Error = S::Error;
   type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
   type Response = S::Response;

   fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
      self.inner.poll_ready(cx)
   }

   fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
      // clone-swap: poll_ready 済みの inner を使う
      let clone = self.inner.clone();
      let mut inner = std::mem::replace(&mut self.inner, clone);

      let path = req.uri().path().to_owned();
      if is_health_check_path(&path) {
         return Box::pin(async move { inner.call(req).await });
      }

      let method = req.method().to_string();
      let start = Instant::now();

      Box::pin(async move {
         let result = inner.call(req).await;
         let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

         match &result {
            Ok(response) if response.status().is_server_error() => {
               tracing::warn!(
                  log.r#type = "canonical",
                  http.method = %method,
                  http.path = %path,
                  http.status_code = response.status().as_u16(),
                  http.outcome = outcome(response.status()),
                  http.latency_ms = latency_ms,
                  "リクエスト完了"
               );
            }
            Ok(response) => {
               tracing::info!(
                  log.r#type = "canonical",
                  http.method = %method,
                  http.path = %path,
                  http.status_code = response.status().as_u16(),
                  http.outcome = outcome(response.status()),
                  http.latency_ms = latency_ms,
                  "リクエスト完了"
               );
            }
            Err(err) => {
               tracing::error!(
                  log.r#type = "canonical",
                  http.method = %method,
                  http.path = %path,
                  http.outcome = "failed",
                  http.latency_ms = latency_ms,
                  error.message = %err,
                  "リクエスト処理エラー"
               );
            }
         }

         result
      })
   }
}

#[cfg(test)]
mod tests {
   use std::sync::{Arc, Mutex};

   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde_json::Value;
   use tracing_subscriber::fmt::MakeWriter;

   use super::*;

   /// 固定のステータス（またはエラー）を返す Service
   #[derive(Clone)]
   struct StubService {
      result: Result<StatusCode, &'static str>,
   }

   impl Service<Request<()>> for StubService {
      type Error = &'static str;
      type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
      type Response = Response<()>;

      fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
         Poll::Ready(Ok(()))
      }

      fn call(&mut self, _req: Request<()>) -> Self::Future {
         let result = self
            .result
            .map(|status| Response::builder().status(status).body(()).unwrap());
         Box::pin(async move { result })
      }
   }

   /// 本番と同じ JSON 形式のログを溜めるバッファ
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
      fn lines(&self) -> Vec<Value> {
         let bytes = self.0.lock().unwrap().clone();
         String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
      }
   }

   fn capture() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
      let buffer = LogBuffer::default();
      let subscriber = tracing_subscriber::fmt()
         .json()
         .flatten_event(true)
         .with_max_level(tracing::Level::INFO)
         .with_writer(buffer.clone())
         .finish();
      (tracing::subscriber::set_default(subscriber), buffer)
   }

   async fn call(result: Result<StatusCode, &'static str>, method: &str, path: &str) -> Vec<Value> {
      let (_guard, buffer) = capture();
      let mut sut = CanonicalLogLineLayer.layer(StubService { result });
      let request = Request::builder()
         .method(method)
         .uri(path)
         .body(())
         .unwrap();

      let _ = sut.call(request).await;

      buffer.lines()
   }

   #[rstest]
   #[case(StatusCode::CREATED, "ok")]
   #[case(StatusCode::NOT_FOUND, "invalid")]
   #[case(StatusCode::BAD_REQUEST, "invalid")]
   #[case(StatusCode::FORBIDDEN, "rejected")]
   #[case(StatusCode::UNAUTHORIZED, "rejected")]
   #[case(StatusCode::INTERNAL_SERVER_ERROR, "failed")]
   fn test_ステータスコードを分類する(#[case] status: StatusCode, #[case] expected: &str) {
      assert_eq!(outcome(status), expected);
   }

   #[tokio::test]
   async fn test_一括登録の完了でメソッドとパスとステータスが1行に出力される() {
      let lines = call(Ok(StatusCode::CREATED), "POST", "/perguntas/bulk").await;

      assert_eq!(lines.len(), 1);
      let line = &lines[0];
      assert_eq!(line["level"], "INFO");
      assert_eq!(line["log.type"], "canonical");
      assert_eq!(line["http.method"], "POST");
      assert_eq!(line["http.path"], "/perguntas/bulk");
      assert_eq!(line["http.status_code"], 201);
      assert_eq!(line["http.outcome"], "ok");
      assert!(line["http.latency_ms"].is_u64());
   }

   #[tokio::test]
   async fn test_apiキーで拒否されたリクエストはrejectedとして出力される() {
      let lines = call(Ok(StatusCode::FORBIDDEN), "GET", "/perguntas").await;

      assert_eq!(lines.len(), 1);
      assert_eq!(lines[0]["level"], "INFO");
      assert_eq!(lines[0]["http.status_code"], 403);
      assert_eq!(lines[0]["http.outcome"], "rejected");
   }

   #[tokio::test]
   async fn test_500応答はwarnレベルで出力される() {
      let lines = call(Ok(StatusCode::INTERNAL_SERVER_ERROR), "POST", "/perguntas").await;

      assert_eq!(lines[0]["level"], "WARN");
      assert_eq!(lines[0]["http.outcome"], "failed");
   }

   #[tokio::test]
   async fn test_healthでは出力されないがその下のパスは出力される() {
      let health = call(Ok(StatusCode::OK), "GET", "/health").await;
      let nested = call(Ok(StatusCode::FORBIDDEN), "GET", "/health/detalhes").await;

      assert!(health.is_empty());
      assert_eq!(nested.len(), 1);
   }

   #[tokio::test]
   async fn test_serviceエラー時にerrorレベルで出力される() {
      let lines = call(Err("store unavailable"), "GET", "/perguntas").await;

      assert_eq!(lines.len(), 1);
      assert_eq!(lines[0]["level"], "ERROR");
      assert_eq!(lines[0]["http.outcome"], "failed");
      assert_eq!(lines[0]["error.message"], "store unavailable");
   }
}
