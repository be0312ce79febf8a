use std::sync::Arc;

use tracing::{info, warn};

use crate::{
  client::Client,
  config::PanelConfig,
  error::Result,
  feed::{ParseOptions, PostRecord},
  panel::Panel,
  source::{BoxedTier, RemoteTier, Source},
};

pub const DEFAULT_SKELETON_COUNT: usize = 6;

/// Loads the blog feed into a [`Panel`], trying each tier in order and
/// falling back to a fixed record when all of them fail.
pub struct FeedLoader {
  tiers: Vec<BoxedTier>,
  fallback: PostRecord,
  profile_url: String,
  skeleton_count: usize,
}

impl FeedLoader {
  pub fn new(
    tiers: Vec<BoxedTier>,
    fallback: PostRecord,
    profile_url: impl Into<String>,
  ) -> Self {
    Self {
      tiers,
      fallback,
      profile_url: profile_url.into(),
      skeleton_count: DEFAULT_SKELETON_COUNT,
    }
  }

  pub fn with_skeleton_count(mut self, count: usize) -> Self {
    self.skeleton_count = count;
    self
  }

  /// Builds the direct tier followed by one tier per configured relay.
  pub fn from_config(config: &PanelConfig) -> Result<Self> {
    let client = Arc::new(config.client.build()?);
    let feed_url = config.feed_url()?;
    let options = config.parse_options();

    let mut sources = vec![Source::Direct(feed_url.clone())];
    for template in &config.relays {
      sources.push(Source::relay(template, feed_url.clone())?);
    }

    let tiers = sources
      .into_iter()
      .map(|source| remote_tier(source, &client, &options))
      .collect();

    Ok(
      Self::new(tiers, config.fallback_post.clone(), &config.profile_url)
        .with_skeleton_count(config.skeleton_count),
    )
  }

  pub fn skeleton_count(&self) -> usize {
    self.skeleton_count
  }

  /// Runs one full load against `panel`. Never fails: every tier error is
  /// logged and absorbed, and the panel always ends up showing either the
  /// fetched posts or the fallback record with an error notice.
  pub async fn load_posts(&self, panel: &mut Panel) {
    panel.show_loading(self.skeleton_count);

    match self.first_success().await {
      Some(posts) => panel.show_posts(posts),
      None => {
        warn!("all feed tiers failed, showing fallback post");
        panel.show_error(self.fallback.clone(), &self.profile_url);
      }
    }
  }

  async fn first_success(&self) -> Option<Vec<PostRecord>> {
    for (i, tier) in self.tiers.iter().enumerate() {
      match tier.fetch().await {
        Ok(posts) => {
          info!(
            tier = i,
            source = %tier.describe(),
            count = posts.len(),
            "loaded posts"
          );
          return Some(posts);
        }
        Err(e) => {
          warn!(
            tier = i,
            source = %tier.describe(),
            kind = %e.failure_kind(),
            "tier failed: {e}"
          );
        }
      }
    }

    None
  }
}

fn remote_tier(
  source: Source,
  client: &Arc<Client>,
  options: &ParseOptions,
) -> BoxedTier {
  Box::new(RemoteTier::new(source, client.clone(), options.clone()))
}
