use scraper::Html;

const ELLIPSIS: &str = "...";

/// Extracts the text content of an HTML fragment: tags are dropped,
/// entities decoded, and whitespace runs collapsed to single spaces.
pub fn html_to_text(html: &str) -> String {
  let fragment = Html::parse_fragment(html);
  let text = fragment.root_element().text().collect::<String>();
  collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Caps `text` at `max_len` characters. Longer text is cut at the last
/// space within the first `max_len + 1` characters (or hard cut at
/// `max_len` when there is none) and gets a trailing ellipsis.
pub fn truncate_text(text: &str, max_len: usize) -> String {
  if text.chars().count() <= max_len {
    return text.to_owned();
  }

  let end = byte_offset(text, max_len + 1);
  let slice = &text[..end];
  let cut = match slice.rfind(' ') {
    Some(pos) if pos > 0 => &slice[..pos],
    _ => &slice[..byte_offset(slice, max_len)],
  };

  format!("{}{ELLIPSIS}", cut.trim())
}

// byte offset of the `n`th char, or the end of the string
fn byte_offset(text: &str, n: usize) -> usize {
  text
    .char_indices()
    .nth(n)
    .map(|(i, _)| i)
    .unwrap_or(text.len())
}
