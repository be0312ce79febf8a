pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("YAML parse error")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Invalid URL in config: {0}")]
  InvalidUrl(#[from] url::ParseError),

  #[error("Bad relay template: {0}")]
  BadRelayTemplate(String),

  #[error("{0}")]
  Message(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("IO error")]
  Io(#[from] std::io::Error),

  #[error("Invalid URL {0}")]
  InvalidUrl(#[from] url::ParseError),

  #[error("Reqwest client error {0:?}")]
  Reqwest(#[from] reqwest::Error),

  #[error("HTTP status error {0} (url: {1})")]
  HttpStatus(reqwest::StatusCode, url::Url),

  #[error("Feed parsing error {0}")]
  FeedParse(#[from] rss::Error),

  #[error("Feed has no items")]
  EmptyFeed,

  #[error("Config error {0:?}")]
  Config(#[from] ConfigError),
}

/// The two ways a feed tier can fail. Both are treated the same by the
/// loader, the distinction only shows up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  Network,
  Parse,
}

impl std::fmt::Display for FailureKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FailureKind::Network => f.write_str("network failure"),
      FailureKind::Parse => f.write_str("parse failure"),
    }
  }
}

impl Error {
  pub fn failure_kind(&self) -> FailureKind {
    match self {
      Error::FeedParse(_) | Error::EmptyFeed => FailureKind::Parse,
      _ => FailureKind::Network,
    }
  }
}
