use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::{
  client::ClientConfig,
  error::{ConfigError, Result},
  feed::{ParseOptions, PostRecord},
  loader::DEFAULT_SKELETON_COUNT,
  source::{Source, DEFAULT_RELAY},
};

pub const DEFAULT_FEED_URL: &str = "https://nagiteja.substack.com/feed";
pub const DEFAULT_PROFILE_URL: &str = "https://nagiteja.substack.com";

/// Settings for the writing panel. Every key is optional in the YAML
/// file; missing keys take the defaults below.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
  /// The syndication feed to load posts from
  pub feed_url: String,
  /// Relay URL templates tried in order after the feed URL fails. Each
  /// must contain `${url}`, which receives the encoded feed URL.
  pub relays: Vec<String>,
  /// The feed owner's page, linked from the error notice
  pub profile_url: String,
  pub max_posts: usize,
  pub skeleton_count: usize,
  pub excerpt_length: usize,
  pub fallback_post: PostRecord,
  pub client: ClientConfig,
}

impl Default for PanelConfig {
  fn default() -> Self {
    let parse = ParseOptions::default();
    Self {
      feed_url: DEFAULT_FEED_URL.into(),
      relays: vec![DEFAULT_RELAY.into()],
      profile_url: DEFAULT_PROFILE_URL.into(),
      max_posts: parse.max_posts,
      skeleton_count: DEFAULT_SKELETON_COUNT,
      excerpt_length: parse.excerpt_length,
      fallback_post: PostRecord::fallback(),
      client: ClientConfig::default(),
    }
  }
}

impl PanelConfig {
  pub fn load_from_file(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    Ok(Self::from_yaml(&content)?)
  }

  pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
    let config: PanelConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Uses the file when given, the built-in defaults otherwise.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => Self::load_from_file(path),
      None => Ok(Self::default()),
    }
  }

  fn validate(&self) -> Result<(), ConfigError> {
    let feed_url = self.feed_url()?;
    Url::parse(&self.profile_url)?;

    for template in &self.relays {
      Source::relay(template, feed_url.clone())?;
    }

    if self.max_posts == 0 {
      return Err(ConfigError::Message("max_posts must be at least 1".into()));
    }

    Ok(())
  }

  pub fn feed_url(&self) -> Result<Url, ConfigError> {
    Ok(Url::parse(&self.feed_url)?)
  }

  pub fn parse_options(&self) -> ParseOptions {
    ParseOptions {
      max_posts: self.max_posts,
      excerpt_length: self.excerpt_length,
      fallback_link: self.fallback_post.link.clone(),
    }
  }
}
