// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub REST seam used by the scan (token discovery, HTTP backend, recorded-fixture backend)
// role: upstream/github-api
// inputs: EffectiveConfig (api url, token); env GITHUB_TOKEN / GH_TOKEN; optional `gh` CLI; env PAR_TEST_FIXTURES
// outputs: Pages of raw JSON items and single pull request details
// side_effects: Network calls to the configured API; spawns `gh` subprocess for token discovery
// invariants:
// - Non-2xx responses, transport errors and non-array listings are errors (fail fast)
// - Token discovery prefers --token, then GITHUB_TOKEN, then GH_TOKEN, then `gh auth token`
// - PAR_TEST_FIXTURES replaces the HTTP backend entirely
// errors: anyhow with the request URL (HTTP) or fixture key (fixtures) in context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;

use crate::cli::EffectiveConfig;
use crate::github::pages::{Page, parse_next_page};

pub const FIXTURES_ENV: &str = "PAR_TEST_FIXTURES";

const REPOS_PER_PAGE: u32 = 100;
const PULLS_PER_PAGE: u32 = 20;
const REVIEWS_PER_PAGE: u32 = 50;
const COMMENTS_PER_PAGE: u32 = 50;

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// --- Trait seam for GitHub API ---
pub trait GithubApi {
  /// Repositories visible to the authenticated user.
  fn list_repositories(&self, page: u32) -> Result<Page>;
  /// All pull requests, most recently updated first.
  fn list_pulls(&self, owner: &str, name: &str, page: u32) -> Result<Page>;
  fn get_pull(&self, owner: &str, name: &str, number: u64) -> Result<serde_json::Value>;
  fn list_reviews(&self, owner: &str, name: &str, number: u64, page: u32) -> Result<Page>;
  /// Conversation comments, oldest first.
  fn list_issue_comments(&self, owner: &str, name: &str, number: u64, page: u32) -> Result<Page>;
}

/// Discover a GitHub token: env vars first, then `gh auth token` if available.
pub fn get_github_token() -> Option<String> {
  for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
    if let Ok(t) = std::env::var(var) {
      if !t.trim().is_empty() {
        return Some(t.trim().to_string());
      }
    }
  }

  if let Ok(output) = std::process::Command::new("gh").args(["auth", "token"]).output() {
    if output.status.success() {
      let t = String::from_utf8_lossy(&output.stdout).trim().to_string();

      if !t.is_empty() {
        return Some(t);
      }
    }
  }

  None
}

struct GithubHttpApi {
  base: String,
  token: String,
  agent: ureq::Agent,
}

impl GithubHttpApi {
  fn new(base: &str, token: String) -> Self {
    Self {
      base: base.trim_end_matches('/').to_string(),
      token,
      agent: ureq::Agent::config_builder().build().into(),
    }
  }

  fn get(&self, path: &str, query: &[(&str, String)]) -> Result<(serde_json::Value, Option<u32>)> {
    let url = format!("{}{}", self.base, path);

    let mut req = self
      .agent
      .get(&url)
      .header("Accept", "application/vnd.github+json")
      .header("X-GitHub-Api-Version", "2022-11-28")
      .header("User-Agent", USER_AGENT)
      .header("Authorization", &format!("Bearer {}", self.token));

    for (k, v) in query {
      req = req.query(*k, v);
    }

    let mut resp = req.call().with_context(|| format!("GET {}", url))?;

    let next_page = resp
      .headers()
      .get("link")
      .and_then(|v| v.to_str().ok())
      .and_then(parse_next_page);

    let body = resp
      .body_mut()
      .read_json::<serde_json::Value>()
      .with_context(|| format!("decoding response of GET {}", url))?;

    Ok((body, next_page))
  }

  fn get_page(&self, path: &str, per_page: u32, page: u32, extra: &[(&str, String)]) -> Result<Page> {
    let mut query: Vec<(&str, String)> = extra.to_vec();
    query.push(("per_page", per_page.to_string()));
    query.push(("page", page.to_string()));

    let (body, next_page) = self.get(path, &query)?;

    match body {
      serde_json::Value::Array(items) => Ok(Page { items, next_page }),
      other => bail!("expected a JSON array from {}{}, got {}", self.base, path, kind(&other)),
    }
  }
}

fn kind(v: &serde_json::Value) -> &'static str {
  match v {
    serde_json::Value::Null => "null",
    serde_json::Value::Bool(_) => "a boolean",
    serde_json::Value::Number(_) => "a number",
    serde_json::Value::String(_) => "a string",
    serde_json::Value::Array(_) => "an array",
    serde_json::Value::Object(_) => "an object",
  }
}

impl GithubApi for GithubHttpApi {
  fn list_repositories(&self, page: u32) -> Result<Page> {
    self.get_page("/user/repos", REPOS_PER_PAGE, page, &[])
  }

  fn list_pulls(&self, owner: &str, name: &str, page: u32) -> Result<Page> {
    let path = format!("/repos/{}/{}/pulls", owner, name);
    let extra = [
      ("state", "all".to_string()),
      ("sort", "updated".to_string()),
      ("direction", "desc".to_string()),
    ];
    self.get_page(&path, PULLS_PER_PAGE, page, &extra)
  }

  fn get_pull(&self, owner: &str, name: &str, number: u64) -> Result<serde_json::Value> {
    let path = format!("/repos/{}/{}/pulls/{}", owner, name, number);
    self.get(&path, &[]).map(|(body, _)| body)
  }

  fn list_reviews(&self, owner: &str, name: &str, number: u64, page: u32) -> Result<Page> {
    let path = format!("/repos/{}/{}/pulls/{}/reviews", owner, name, number);
    self.get_page(&path, REVIEWS_PER_PAGE, page, &[])
  }

  fn list_issue_comments(&self, owner: &str, name: &str, number: u64, page: u32) -> Result<Page> {
    let path = format!("/repos/{}/{}/issues/{}/comments", owner, name, number);
    self.get_page(&path, COMMENTS_PER_PAGE, page, &[])
  }
}

/// Recorded upstream responses, page by page.
///
/// Listings are keyed by `owner/name`; per pull request resources by `owner/name#number`.
/// Review and comment listings without an entry read as a single empty page.
#[derive(Debug, Default, Deserialize)]
pub struct FixtureApi {
  #[serde(default)]
  repositories: Vec<Vec<serde_json::Value>>,
  #[serde(default)]
  pulls: HashMap<String, Vec<Vec<serde_json::Value>>>,
  #[serde(default)]
  pull_details: HashMap<String, serde_json::Value>,
  #[serde(default)]
  reviews: HashMap<String, Vec<Vec<serde_json::Value>>>,
  #[serde(default)]
  comments: HashMap<String, Vec<Vec<serde_json::Value>>>,
}

impl FixtureApi {
  pub fn from_value(v: serde_json::Value) -> Result<Self> {
    serde_json::from_value(v).context("parsing GitHub fixtures")
  }

  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading fixtures {}", path.display()))?;
    let v: serde_json::Value =
      serde_json::from_str(&raw).with_context(|| format!("parsing fixtures {}", path.display()))?;
    Self::from_value(v)
  }

  fn serve(pages: Option<&Vec<Vec<serde_json::Value>>>, page: u32, what: &str) -> Result<Page> {
    let Some(pages) = pages else {
      return Ok(Page::default());
    };
    if pages.is_empty() && page == 1 {
      return Ok(Page::default());
    }

    let idx = page.checked_sub(1).map(|i| i as usize);
    let items = idx
      .and_then(|i| pages.get(i))
      .ok_or_else(|| anyhow!("no fixture page {} for {}", page, what))?;

    Ok(Page {
      items: items.clone(),
      next_page: if (page as usize) < pages.len() { Some(page + 1) } else { None },
    })
  }

  fn pull_key(owner: &str, name: &str, number: u64) -> String {
    format!("{}/{}#{}", owner, name, number)
  }
}

impl GithubApi for FixtureApi {
  fn list_repositories(&self, page: u32) -> Result<Page> {
    Self::serve(Some(&self.repositories), page, "repositories")
  }

  fn list_pulls(&self, owner: &str, name: &str, page: u32) -> Result<Page> {
    let key = format!("{}/{}", owner, name);
    Self::serve(self.pulls.get(&key), page, &format!("pulls of {}", key))
  }

  fn get_pull(&self, owner: &str, name: &str, number: u64) -> Result<serde_json::Value> {
    let key = Self::pull_key(owner, name, number);
    self
      .pull_details
      .get(&key)
      .cloned()
      .ok_or_else(|| anyhow!("no fixture for pull request {}", key))
  }

  fn list_reviews(&self, owner: &str, name: &str, number: u64, page: u32) -> Result<Page> {
    let key = Self::pull_key(owner, name, number);
    Self::serve(self.reviews.get(&key), page, &format!("reviews of {}", key))
  }

  fn list_issue_comments(&self, owner: &str, name: &str, number: u64, page: u32) -> Result<Page> {
    let key = Self::pull_key(owner, name, number);
    Self::serve(self.comments.get(&key), page, &format!("comments of {}", key))
  }
}

/// Select the backend for this run: recorded fixtures when PAR_TEST_FIXTURES is set,
/// otherwise HTTP with the configured or discovered token.
pub fn build_api(cfg: &EffectiveConfig) -> Result<Box<dyn GithubApi>> {
  if let Ok(path) = std::env::var(FIXTURES_ENV) {
    tracing::debug!(fixtures = %path, "using recorded GitHub fixtures");
    return Ok(Box::new(FixtureApi::from_path(path)?));
  }

  let token = match cfg.token.clone().or_else(get_github_token) {
    Some(t) => t,
    None => bail!("missing token: pass --token, set GITHUB_TOKEN, or run: gh auth login"),
  };

  Ok(Box::new(GithubHttpApi::new(&cfg.api_url, token)))
}
