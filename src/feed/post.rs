use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";
pub const DEFAULT_TAG: &str = "Substack";
pub const DEFAULT_MAX_POSTS: usize = 9;
pub const DEFAULT_EXCERPT_LENGTH: usize = 140;

/// One feed entry, normalized for rendering. Every field is always a
/// string; absent source fields are replaced by defaults during parsing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct PostRecord {
  pub title: String,
  pub link: String,
  /// `Mon DD, YYYY` or empty
  pub date: String,
  pub excerpt: String,
  pub tag: String,
}

impl PostRecord {
  /// The record shown when no tier could produce any posts.
  pub fn fallback() -> Self {
    Self {
      title: "Are stablecoins crypto’s biggest use case?".into(),
      link: "https://nagiteja.substack.com/p/are-stablecoins-cryptos-biggest-use"
        .into(),
      date: "Jan 22, 2026".into(),
      excerpt: "Why stablecoins sit at the center of crypto utility, what \
                makes them resilient, and where the risks still hide."
        .into(),
      tag: DEFAULT_TAG.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
  pub max_posts: usize,
  pub excerpt_length: usize,
  /// Used for items without a link.
  pub fallback_link: String,
}

impl Default for ParseOptions {
  fn default() -> Self {
    Self {
      max_posts: DEFAULT_MAX_POSTS,
      excerpt_length: DEFAULT_EXCERPT_LENGTH,
      fallback_link: PostRecord::fallback().link,
    }
  }
}
