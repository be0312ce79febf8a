use std::sync::Arc;

use url::Url;

use crate::{
  client::Client,
  error::{ConfigError, Error, Result},
  feed::{parse_feed, ParseOptions, PostRecord},
};

/// Placeholder in relay templates that receives the encoded feed URL.
pub const RELAY_PLACEHOLDER: &str = "${url}";

pub const DEFAULT_RELAY: &str = "https://api.allorigins.win/raw?url=${url}";

/// Where a remote tier fetches the feed document from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source {
  /// The feed URL itself
  Direct(Url),
  /// A pass-through relay that embeds the percent-encoded feed URL,
  /// used to get around cross-origin restrictions on the feed host.
  Relay { template: String, target: Url },
}

impl Source {
  pub fn relay(template: &str, target: Url) -> Result<Self, ConfigError> {
    let source = Source::Relay {
      template: template.to_owned(),
      target,
    };
    // validate eagerly so that a bad template fails at startup
    source.url()?;
    Ok(source)
  }

  pub fn url(&self) -> Result<Url, ConfigError> {
    match self {
      Source::Direct(url) => Ok(url.clone()),
      Source::Relay { template, target } => {
        if !template.contains(RELAY_PLACEHOLDER) {
          return Err(ConfigError::BadRelayTemplate(format!(
            "{template:?} has no {RELAY_PLACEHOLDER} placeholder"
          )));
        }

        let encoded = urlencoding::encode(target.as_str());
        let url = template.replace(RELAY_PLACEHOLDER, &encoded);
        Ok(Url::parse(&url)?)
      }
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Source::Direct(_) => "direct",
      Source::Relay { .. } => "relay",
    }
  }
}

/// One attempt in the ordered fallback sequence. A tier succeeds only
/// with a non-empty list of posts.
#[async_trait::async_trait]
pub trait FeedTier {
  fn describe(&self) -> String;

  async fn fetch(&self) -> Result<Vec<PostRecord>>;
}

pub type BoxedTier = Box<dyn FeedTier + Send + Sync>;

pub struct RemoteTier {
  source: Source,
  client: Arc<Client>,
  options: ParseOptions,
}

impl RemoteTier {
  pub fn new(
    source: Source,
    client: Arc<Client>,
    options: ParseOptions,
  ) -> Self {
    Self {
      source,
      client,
      options,
    }
  }
}

#[async_trait::async_trait]
impl FeedTier for RemoteTier {
  fn describe(&self) -> String {
    match self.source.url() {
      Ok(url) => format!("{} {}", self.source.name(), url),
      Err(_) => self.source.name().to_owned(),
    }
  }

  async fn fetch(&self) -> Result<Vec<PostRecord>> {
    let url = self.source.url()?;
    let resp = self.client.get(&url).await?.error_for_status()?;
    tracing::debug!(
      url = %resp.url(),
      bytes = resp.body().len(),
      "fetched feed"
    );

    let posts = parse_feed(resp.text().as_bytes(), &self.options)?;
    if posts.is_empty() {
      return Err(Error::EmptyFeed);
    }

    Ok(posts)
  }
}
