use std::fmt;

use anyhow::{Result, bail};
use chrono::{DateTime, Local};
use clap::Parser;

use crate::repo_filter::RepoFilter;
use crate::window;

#[derive(Parser, Debug)]
#[command(
    name = "pr-activity-report",
    version,
    about = "Monthly report of the pull requests you merged, approved, and reviewed on GitHub",
    long_about = None
)]
pub struct Cli {
  /// Your GitHub handle
  #[arg(long)]
  pub user: Option<String>,

  /// GitHub token (default: GITHUB_TOKEN, GH_TOKEN, then `gh auth token`)
  #[arg(long)]
  pub token: Option<String>,

  /// Comma separated list of repositories to inspect, in owner/name format
  #[arg(long)]
  pub repositories: Option<String>,

  /// Months to look back; 1 = current month, 2 = current + last, and so on
  #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
  pub months: u32,

  /// Comment text that counts as an approval when posted by you
  #[arg(long, default_value = "/approve")]
  pub approval_marker: String,

  /// GitHub REST API base URL (GitHub Enterprise: https://<host>/api/v3)
  #[arg(long, default_value = "https://api.github.com")]
  pub api_url: String,

  /// Only print warnings and the final report
  #[arg(long, short)]
  pub quiet: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

pub struct EffectiveConfig {
  pub user: String,
  pub token: Option<String>,
  pub repositories: RepoFilter,
  pub months: u32,
  pub approval_marker: String,
  pub api_url: String,
  pub quiet: bool,
  pub now: Option<DateTime<Local>>,
}

impl fmt::Debug for EffectiveConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EffectiveConfig")
      .field("user", &self.user)
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .field("repositories", &self.repositories)
      .field("months", &self.months)
      .field("approval_marker", &self.approval_marker)
      .field("api_url", &self.api_url)
      .field("quiet", &self.quiet)
      .field("now", &self.now)
      .finish()
  }
}

fn non_blank(v: Option<String>) -> Option<String> {
  v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let Some(user) = non_blank(cli.user) else {
    bail!("missing --user: your GitHub handle is required");
  };

  let Some(repositories) = non_blank(cli.repositories) else {
    bail!("missing --repositories: provide a comma separated owner/name list");
  };
  let repositories = RepoFilter::parse(&repositories)?;

  if cli.approval_marker.trim().is_empty() {
    bail!("--approval-marker must not be empty");
  }

  let now = match cli.now_override.as_deref() {
    Some(raw) => Some(window::parse_now_override(raw)?),
    None => None,
  };

  Ok(EffectiveConfig {
    user,
    token: non_blank(cli.token),
    repositories,
    months: cli.months,
    approval_marker: cli.approval_marker,
    api_url: cli.api_url,
    quiet: cli.quiet,
    now,
  })
}
