use mime::Mime;
use reqwest::header::HeaderMap;
use url::Url;

use crate::error::{Error, Result};

/// A fully buffered HTTP response.
#[derive(Clone, Debug)]
pub struct Response {
  url: Url,
  status: reqwest::StatusCode,
  headers: HeaderMap,
  body: Box<[u8]>,
}

impl Response {
  pub async fn from_reqwest_resp(resp: reqwest::Response) -> Result<Self> {
    let status = resp.status();
    let headers = resp.headers().clone();
    let url = resp.url().clone();
    let body = resp.bytes().await?.to_vec().into_boxed_slice();

    Ok(Self {
      url,
      status,
      headers,
      body,
    })
  }

  #[cfg(test)]
  pub fn new(
    url: Url,
    status: reqwest::StatusCode,
    headers: HeaderMap,
    body: Box<[u8]>,
  ) -> Self {
    Self {
      url,
      status,
      headers,
      body,
    }
  }

  pub fn error_for_status(self) -> Result<Self> {
    if !self.status.is_success() {
      return Err(Error::HttpStatus(self.status, self.url));
    }

    Ok(self)
  }

  pub fn header(&self, name: &str) -> Option<&str> {
    self.headers.get(name).and_then(|v| v.to_str().ok())
  }

  pub fn text_with_charset(&self, default_encoding: &str) -> String {
    let content_type = self.content_type();
    let encoding_name = content_type
      .as_ref()
      .and_then(|mime| {
        mime.get_param("charset").map(|charset| charset.as_str())
      })
      .unwrap_or(default_encoding);
    let encoding = encoding_rs::Encoding::for_label(encoding_name.as_bytes())
      .unwrap_or(encoding_rs::UTF_8);

    let (text, _, _) = encoding.decode(self.body());
    text.into_owned()
  }

  pub fn text(&self) -> String {
    self.text_with_charset("utf-8")
  }

  pub fn content_type(&self) -> Option<Mime> {
    self.header("content-type").and_then(|v| v.parse().ok())
  }

  pub fn url(&self) -> &Url {
    &self.url
  }

  pub fn body(&self) -> &[u8] {
    &self.body
  }
}
