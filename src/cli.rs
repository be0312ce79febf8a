use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::{
  config::PanelConfig,
  error::Result,
  loader::FeedLoader,
  panel::Panel,
  server::{self, ServerConfig},
  theme::Theme,
};

#[derive(Parser)]
#[clap(about = "Loads a blog feed and renders it as a panel of post tiles")]
pub struct Cli {
  #[clap(subcommand)]
  subcmd: SubCommand,

  /// YAML config file; built-in defaults are used when omitted
  #[clap(long, short, env = "WRITING_PANEL_CONFIG")]
  config: Option<PathBuf>,
}

#[derive(Parser)]
enum SubCommand {
  /// Serve the page over HTTP
  Server(ServerConfig),
  /// Load the feed once and print the rendered panel
  Render(RenderConfig),
}

#[derive(Parser)]
struct RenderConfig {
  /// Render a complete HTML page instead of the panel fragment
  #[clap(long)]
  page: bool,
  /// Write the output to this file instead of stdout
  #[clap(long, short)]
  output: Option<PathBuf>,
}

impl Cli {
  pub async fn run(self) -> Result<()> {
    let panel_config = PanelConfig::load(self.config.as_deref())?;

    match self.subcmd {
      SubCommand::Server(server_config) => {
        server_config.run(&panel_config).await
      }
      SubCommand::Render(render_config) => {
        let loader = FeedLoader::from_config(&panel_config)?;
        render_config.run(&loader).await
      }
    }
  }
}

impl RenderConfig {
  async fn run(&self, loader: &FeedLoader) -> Result<()> {
    let html = render_once(loader, self.page).await;

    match &self.output {
      Some(path) => {
        std::fs::write(path, html)?;
        info!("wrote {}", path.display());
      }
      None => println!("{html}"),
    }

    Ok(())
  }
}

async fn render_once(loader: &FeedLoader, page: bool) -> String {
  let mut panel = Panel::new();
  loader.load_posts(&mut panel).await;
  info!(posts = panel.posts().count(), "rendered panel");

  if page {
    server::render_page(Theme::default(), &panel, false).into_string()
  } else {
    panel.render().into_string()
  }
}
