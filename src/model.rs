// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define month keys, pull request identity, report records, and the typed upstream records read from GitHub JSON
// role: model/types
// outputs: YearMonth, PrKey, PullRequestRecord; Repository, PullRequest, Review, IssueComment built from serde_json::Value
// invariants: YearMonth orders chronologically (year, then month); PrKey is (owner/name, number)
// errors: Upstream records missing required fields fail with the dotted field path in context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};

use crate::ext::serde_json::JsonFetch;

/// A calendar month bucket key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
  pub year: i32,
  pub month: u32,
}

impl YearMonth {
  #[cfg(test)]
  pub fn new(year: i32, month: u32) -> Self {
    Self { year, month }
  }

  /// Month of `at` as seen in the local time zone.
  pub fn of_local(at: &DateTime<Utc>) -> Self {
    Self::of(&at.with_timezone(&Local))
  }

  pub fn of<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
    Self {
      year: at.year(),
      month: at.month(),
    }
  }
}

impl fmt::Display for YearMonth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
      Some(d) => write!(f, "{}", d.format("%B %Y")),
      None => write!(f, "{:04}-{:02}", self.year, self.month),
    }
  }
}

/// Identity of a pull request across buckets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrKey {
  pub repo: String,
  pub number: u64,
}

/// One pull request as it appears in the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PullRequestRecord {
  /// `owner/name`
  pub repo: String,
  pub number: u64,
  pub title: String,
  /// Month merged by the tracked user, or approved through a comment.
  pub month_merged: Option<YearMonth>,
  /// Distinct review/comment months, in discovery order.
  pub months_reviewed: Vec<YearMonth>,
}

impl PullRequestRecord {
  pub fn new(repo: &str, pr: &PullRequest) -> Self {
    Self {
      repo: repo.to_string(),
      number: pr.number,
      title: pr.title.clone(),
      month_merged: None,
      months_reviewed: Vec::new(),
    }
  }

  pub fn key(&self) -> PrKey {
    PrKey {
      repo: self.repo.clone(),
      number: self.number,
    }
  }
}

impl fmt::Display for PullRequestRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}#{}: {}", self.repo, self.number, self.title)?;
    if let Some(month) = self.month_merged {
      write!(f, " [merged: {}]", month)?;
    }
    if !self.months_reviewed.is_empty() {
      let months: Vec<String> = self.months_reviewed.iter().map(|m| m.to_string()).collect();
      write!(f, " [reviewed: {}]", months.join(", "))?;
    }
    Ok(())
  }
}

// --- Upstream records (GitHub REST JSON) ---

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repository {
  pub owner: String,
  pub name: String,
}

impl Repository {
  pub fn from_json(v: &serde_json::Value) -> Result<Self> {
    Ok(Self {
      owner: v.fetch("owner.login").required()?,
      name: v.fetch("name").required()?,
    })
  }

  pub fn slug(&self) -> String {
    format!("{}/{}", self.owner, self.name)
  }
}

#[derive(Clone, Debug)]
pub struct PullRequest {
  pub number: u64,
  pub title: String,
  pub state: String,
  pub author: String,
  pub updated_at: DateTime<Utc>,
  pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
  pub fn from_json(v: &serde_json::Value) -> Result<Self> {
    let number: u64 = v.fetch("number").required()?;
    let parse = || -> Result<Self> {
      Ok(Self {
        number,
        title: v.fetch("title").required()?,
        state: v.fetch("state").to_or_default(),
        author: v.fetch("user.login").required()?,
        updated_at: v.fetch("updated_at").required()?,
        merged_at: v.fetch("merged_at").optional()?,
      })
    };
    parse().with_context(|| format!("pull request #{}", number))
  }
}

/// Login of the account that merged a pull request, from its detail JSON.
pub fn merged_by_login(detail: &serde_json::Value) -> Result<String> {
  detail.fetch("merged_by.login").required()
}

#[derive(Clone, Debug)]
pub struct Review {
  /// `None` for deleted accounts.
  pub author: Option<String>,
  /// `None` while the review is pending.
  pub submitted_at: Option<DateTime<Utc>>,
}

impl Review {
  pub fn from_json(v: &serde_json::Value) -> Result<Self> {
    Ok(Self {
      author: v.fetch("user.login").optional()?,
      submitted_at: v.fetch("submitted_at").optional()?,
    })
  }
}

#[derive(Clone, Debug)]
pub struct IssueComment {
  pub author: Option<String>,
  pub created_at: DateTime<Utc>,
  pub body: String,
}

impl IssueComment {
  pub fn from_json(v: &serde_json::Value) -> Result<Self> {
    Ok(Self {
      author: v.fetch("user.login").optional()?,
      created_at: v.fetch("created_at").required()?,
      body: v.fetch("body").to_or_default(),
    })
  }
}
