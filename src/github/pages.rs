use anyhow::Result;
use once_cell::sync::Lazy;

/// One page of a paginated listing.
#[derive(Clone, Debug, Default)]
pub struct Page {
  pub items: Vec<serde_json::Value>,
  /// `None` on the last page.
  pub next_page: Option<u32>,
}

/// Lazy page sequence driven by a fetch callback, starting at page 1.
///
/// Stops after the last page or the first error; `stop` suppresses any further fetch.
pub struct Pages<F> {
  fetch: F,
  next: Option<u32>,
}

pub fn pages<F>(fetch: F) -> Pages<F>
where
  F: FnMut(u32) -> Result<Page>,
{
  Pages { fetch, next: Some(1) }
}

impl<F> Pages<F> {
  pub fn stop(&mut self) {
    self.next = None;
  }
}

impl<F> Iterator for Pages<F>
where
  F: FnMut(u32) -> Result<Page>,
{
  type Item = Result<Vec<serde_json::Value>>;

  fn next(&mut self) -> Option<Self::Item> {
    let page = self.next.take()?;

    match (self.fetch)(page) {
      Ok(p) => {
        self.next = p.next_page;
        Some(Ok(p.items))
      }
      Err(e) => Some(Err(e)),
    }
  }
}

/// Extract the `rel="next"` page number from a GitHub `Link` header.
pub fn parse_next_page(link: &str) -> Option<u32> {
  static RE_NEXT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r#"<[^>]*[?&]page=(\d+)[^>]*>\s*;\s*rel="next""#).unwrap());

  link
    .split(',')
    .find_map(|part| RE_NEXT.captures(part.trim()))
    .and_then(|c| c.get(1))
    .and_then(|m| m.as_str().parse().ok())
}
