use std::{
  collections::HashMap,
  net::SocketAddr,
  path::PathBuf,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  },
};

use axum::{
  extract::State,
  response::{IntoResponse, Response},
  Router,
};
use http::{header, StatusCode, Uri};
use url::Url;

use crate::{
  error::{Error, Result},
  feed::PostRecord,
  source::FeedTier,
};

pub fn fixture(name: &str) -> Vec<u8> {
  let path: PathBuf =
    format!("{}/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name).into();
  std::fs::read(&path)
    .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

pub fn fixture_string(name: &str) -> String {
  String::from_utf8(fixture(name)).expect("fixture is not utf-8")
}

/// Wraps item elements into a minimal RSS 2.0 document.
pub fn rss_document(items: &[String]) -> String {
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test feed</title>
    <link>https://example.com</link>
    <description>Test</description>
    {}
  </channel>
</rss>"#,
    items.join("\n    ")
  )
}

#[derive(Clone)]
enum StubRoute {
  Body(String),
  Status(u16),
  /// Serves the body and records the `url` query parameter.
  Relay(String),
}

#[derive(Clone, Default)]
struct StubState {
  routes: Arc<Mutex<HashMap<String, StubRoute>>>,
  hits: Arc<Mutex<HashMap<String, usize>>>,
  relayed: Arc<Mutex<Vec<String>>>,
}

/// An in-process HTTP server standing in for the feed host and the
/// relay. Unknown paths answer 404.
pub struct StubServer {
  addr: SocketAddr,
  state: StubState,
}

impl StubServer {
  pub async fn start() -> Self {
    let state = StubState::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
      .await
      .expect("failed to bind stub server");
    let addr = listener.local_addr().expect("no local addr");

    let app = Router::new()
      .fallback(handle_stub)
      .with_state(state.clone());
    tokio::spawn(async move {
      axum::serve(listener, app).await.expect("stub server failed");
    });

    Self { addr, state }
  }

  fn route(self, path: &str, route: StubRoute) -> Self {
    self
      .state
      .routes
      .lock()
      .unwrap()
      .insert(path.to_owned(), route);
    self
  }

  pub fn ok(self, path: &str, body: String) -> Self {
    self.route(path, StubRoute::Body(body))
  }

  pub fn status(self, path: &str, status: u16) -> Self {
    self.route(path, StubRoute::Status(status))
  }

  pub fn relay(self, path: &str, body: String) -> Self {
    self.route(path, StubRoute::Relay(body))
  }

  pub fn url(&self, path: &str) -> Url {
    Url::parse(&format!("http://{}{}", self.addr, path)).unwrap()
  }

  pub fn hits(&self, path: &str) -> usize {
    let hits = self.state.hits.lock().unwrap();
    hits.get(path).copied().unwrap_or(0)
  }

  pub fn relayed_targets(&self) -> Vec<String> {
    self.state.relayed.lock().unwrap().clone()
  }
}

async fn handle_stub(State(state): State<StubState>, uri: Uri) -> Response {
  *state
    .hits
    .lock()
    .unwrap()
    .entry(uri.path().to_owned())
    .or_default() += 1;

  let route = state.routes.lock().unwrap().get(uri.path()).cloned();
  let xml = [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")];

  match route {
    None => (StatusCode::NOT_FOUND, "not found").into_response(),
    Some(StubRoute::Status(status)) => {
      StatusCode::from_u16(status).unwrap().into_response()
    }
    Some(StubRoute::Body(body)) => (xml, body).into_response(),
    Some(StubRoute::Relay(body)) => {
      let query = uri.query().unwrap_or_default();
      let target = url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "url")
        .map(|(_, v)| v.into_owned());
      if let Some(target) = target {
        state.relayed.lock().unwrap().push(target);
      }
      (xml, body).into_response()
    }
  }
}

/// Counts how often a tier was asked to fetch.
#[derive(Clone, Default)]
pub struct CallCount(Arc<AtomicUsize>);

impl CallCount {
  pub fn get(&self) -> usize {
    self.0.load(Ordering::SeqCst)
  }
}

type ErrorFn = Box<dyn Fn() -> Error + Send + Sync>;

/// A tier with a canned outcome and no network access.
pub struct StaticTier {
  outcome: std::result::Result<Vec<PostRecord>, ErrorFn>,
  calls: CallCount,
}

impl StaticTier {
  pub fn ok(posts: Vec<PostRecord>) -> Self {
    Self {
      outcome: Ok(posts),
      calls: CallCount::default(),
    }
  }

  pub fn err(f: impl Fn() -> Error + Send + Sync + 'static) -> Self {
    Self {
      outcome: Err(Box::new(f)),
      calls: CallCount::default(),
    }
  }

  pub fn calls(&self) -> CallCount {
    self.calls.clone()
  }
}

#[async_trait::async_trait]
impl FeedTier for StaticTier {
  fn describe(&self) -> String {
    "static".into()
  }

  async fn fetch(&self) -> Result<Vec<PostRecord>> {
    self.calls.0.fetch_add(1, Ordering::SeqCst);
    match &self.outcome {
      Ok(posts) if posts.is_empty() => Err(Error::EmptyFeed),
      Ok(posts) => Ok(posts.clone()),
      Err(f) => Err(f()),
    }
  }
}
