mod post;

use quick_xml::{events::Event, Reader};

use crate::error::Result;
use crate::html::{html_to_text, truncate_text};
use crate::util::date::format_date;

pub use post::{ParseOptions, PostRecord};

/// A syndication feed document as fetched from a tier.
#[derive(Clone, Debug, PartialEq)]
pub struct Feed {
  channel: rss::Channel,
  /// Full text content of each item's description, including text
  /// inside raw child elements that the rss parser drops.
  descriptions: Vec<String>,
}

impl Feed {
  /// Malformed markup and documents that are not RSS are rejected
  /// here with [`crate::error::Error::FeedParse`].
  pub fn from_rss_content(content: &[u8]) -> Result<Self> {
    let cursor = std::io::Cursor::new(content);
    let channel = rss::Channel::read_from(cursor)?;
    let descriptions = description_texts(content);
    Ok(Self {
      channel,
      descriptions,
    })
  }

  pub fn items(&self) -> &[rss::Item] {
    &self.channel.items
  }

  /// Normalizes the first `options.max_posts` items, in document order.
  pub fn posts(&self, options: &ParseOptions) -> Vec<PostRecord> {
    // only trust the raw texts when they line up with the parsed items
    let aligned = self.descriptions.len() == self.items().len();

    self
      .items()
      .iter()
      .enumerate()
      .take(options.max_posts)
      .map(|(i, item)| {
        let raw = aligned.then(|| self.descriptions[i].as_str());
        normalize_item(item, raw, options)
      })
      .collect()
  }
}

/// Parses raw feed text into post records. A well-formed feed without
/// items yields an empty list; callers decide whether that is a failure.
pub fn parse_feed(
  content: &[u8],
  options: &ParseOptions,
) -> Result<Vec<PostRecord>> {
  let feed = Feed::from_rss_content(content)?;
  Ok(feed.posts(options))
}

fn normalize_item(
  item: &rss::Item,
  raw_description: Option<&str>,
  options: &ParseOptions,
) -> PostRecord {
  let title = non_empty(item.title()).unwrap_or(post::UNTITLED);
  let link =
    non_empty(item.link()).unwrap_or(options.fallback_link.as_str());
  let date = non_empty(item.pub_date())
    .map(format_date)
    .unwrap_or_default();
  // the subtree text equals the rss text for escaped and CDATA markup,
  // and also covers descriptions made of raw child elements
  let description = non_empty(raw_description)
    .or(non_empty(item.description()))
    .unwrap_or_default();
  let excerpt = html_to_text(description);
  let tag = non_empty(item.categories().first().map(|c| c.name()))
    .unwrap_or(post::DEFAULT_TAG);

  PostRecord {
    title: title.to_owned(),
    link: link.to_owned(),
    date,
    excerpt: truncate_text(&excerpt, options.excerpt_length),
    tag: tag.to_owned(),
  }
}

fn non_empty(field: Option<&str>) -> Option<&str> {
  field.map(str::trim).filter(|s| !s.is_empty())
}

/// Collects the concatenated text of every `<item>`'s `<description>`
/// in document order, descending into nested elements. Items without a
/// description get an empty string.
fn description_texts(content: &[u8]) -> Vec<String> {
  let mut reader = Reader::from_reader(content);
  let mut buf = Vec::new();
  let mut texts: Vec<String> = Vec::new();

  let mut depth = 0usize;
  let mut item_at: Option<usize> = None;
  let mut description_at: Option<usize> = None;

  loop {
    match reader.read_event_into(&mut buf) {
      Ok(Event::Start(ref e)) => {
        depth += 1;
        let name = e.name();
        if item_at.is_none() && name.as_ref() == b"item" {
          item_at = Some(depth);
          texts.push(String::new());
        } else if item_at == Some(depth - 1)
          && description_at.is_none()
          && name.as_ref() == b"description"
        {
          description_at = Some(depth);
        }
      }
      Ok(Event::Empty(ref e)) => {
        if item_at.is_none() && e.name().as_ref() == b"item" {
          texts.push(String::new());
        }
      }
      Ok(Event::Text(ref e)) if description_at.is_some() => {
        let unescaped = e.unescape().unwrap_or_default();
        if let Some(text) = texts.last_mut() {
          text.push_str(&unescaped);
        }
      }
      Ok(Event::CData(ref e)) if description_at.is_some() => {
        if let Some(text) = texts.last_mut() {
          text.push_str(&String::from_utf8_lossy(e.as_ref()));
        }
      }
      Ok(Event::End(_)) => {
        if description_at == Some(depth) {
          description_at = None;
        }
        if item_at == Some(depth) {
          item_at = None;
        }
        depth = depth.saturating_sub(1);
      }
      Ok(Event::Eof) | Err(_) => break,
      _ => {}
    }
    buf.clear();
  }

  texts
}
