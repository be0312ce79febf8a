mod response;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, Result};

pub use self::response::Response;

const DEFAULT_ACCEPT: &str =
  "application/rss+xml, application/xml;q=0.9, text/xml;q=0.8, */*;q=0.5";

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ClientConfig {
  #[serde(default)]
  user_agent: Option<String>,
  #[serde(default)]
  accept: Option<String>,
  /// Overall request timeout. Unset means the transport's own limits
  /// are the only ones.
  #[serde(default)]
  #[serde(deserialize_with = "duration_str::deserialize_option_duration")]
  timeout: Option<Duration>,
}

impl ClientConfig {
  fn to_builder(&self) -> Result<reqwest::ClientBuilder, ConfigError> {
    let mut builder = reqwest::Client::builder();

    if let Some(user_agent) = &self.user_agent {
      builder = builder.user_agent(user_agent);
    } else {
      builder = builder.user_agent(crate::util::USER_AGENT);
    }

    let accept = self.accept.as_deref().unwrap_or(DEFAULT_ACCEPT);
    let accept = HeaderValue::from_str(accept).map_err(|e| {
      ConfigError::Message(format!("invalid Accept value {accept:?}: {e}"))
    })?;
    let mut header_map = HeaderMap::new();
    header_map.append("Accept", accept);

    builder = builder.default_headers(header_map);
    if let Some(timeout) = self.timeout {
      builder = builder.timeout(timeout);
    }

    Ok(builder)
  }

  pub fn build(&self) -> Result<Client> {
    let reqwest_client = self.to_builder()?.build()?;
    Ok(Client::new(reqwest_client))
  }
}

#[derive(Clone)]
pub struct Client {
  client: reqwest::Client,
}

impl Client {
  fn new(client: reqwest::Client) -> Self {
    Self { client }
  }

  pub async fn get(&self, url: &Url) -> Result<Response> {
    let resp = self.client.get(url.clone()).send().await?;
    Response::from_reqwest_resp(resp).await
  }
}
