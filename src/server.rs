mod web;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use clap::Parser;
use http::StatusCode;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::{config::PanelConfig, error::Result, loader::FeedLoader};

pub use web::render_page;

#[derive(Parser)]
pub struct ServerConfig {
  #[clap(long, short, default_value = "127.0.0.1:4080")]
  bind: String,
}

impl ServerConfig {
  pub async fn run(self, panel_config: &PanelConfig) -> Result<()> {
    let loader = FeedLoader::from_config(panel_config)?;
    serve(&self.bind, loader).await
  }
}

pub fn router(loader: Arc<FeedLoader>) -> Router {
  web::router()
    .route("/health", get(|| async { "ok" }))
    .fallback(get(|| async { (StatusCode::NOT_FOUND, "Page not found") }))
    .layer(Extension(loader))
    .layer(CompressionLayer::new().gzip(true))
}

pub async fn serve(bind: &str, loader: FeedLoader) -> Result<()> {
  info!("listening on {}", bind);
  let listener = tokio::net::TcpListener::bind(bind).await?;

  let app = router(Arc::new(loader));

  info!("starting server");
  Ok(axum::serve(listener, app).await?)
}
