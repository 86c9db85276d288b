// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Decide which month buckets and categories a pull request belongs to for the tracked user
// role: core/classification
// inputs: PullRequest list items, reviews, issue comments; window start; tracked login; approval marker
// outputs: Gate decisions per pull request and an Activity accumulator that finishes into a PullRequestRecord
// invariants:
// - Anything timestamped strictly before the window start never reaches a bucket
// - Own merged pull requests are never inspected for review/comment activity
// - The first approval (merge or marker comment) wins; later approvals count as reviews
// - Reviewed months are distinct and keep discovery order
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Local, Utc};

use crate::model::{IssueComment, PullRequest, PullRequestRecord, Review, YearMonth};

/// Outcome of the checks that only need the pull request list item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
  /// Last update predates the window; nothing after it on the listing is in range either.
  OutOfWindow,
  Skip(SkipReason),
  /// Authored and merged by the tracked user in this month.
  OwnMerged(YearMonth),
  /// Scan reviews and comments. `merged` is set when someone else's pull request
  /// was merged inside the window and the merging account still needs resolving.
  Inspect { merged: Option<YearMonth> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
  MergedBeforeWindow,
  OwnOpen,
}

#[derive(Clone, Debug)]
pub struct Classifier {
  user: String,
  since: DateTime<Utc>,
  approval_marker: String,
}

impl Classifier {
  pub fn new(user: &str, since: DateTime<Local>, approval_marker: &str) -> Self {
    Self {
      user: user.to_string(),
      since: since.with_timezone(&Utc),
      approval_marker: approval_marker.to_string(),
    }
  }

  pub fn user(&self) -> &str {
    &self.user
  }

  fn in_window(&self, at: &DateTime<Utc>) -> bool {
    *at >= self.since
  }

  fn is_user(&self, login: Option<&str>) -> bool {
    login == Some(self.user.as_str())
  }

  pub fn gate(&self, pr: &PullRequest) -> Gate {
    if !self.in_window(&pr.updated_at) {
      return Gate::OutOfWindow;
    }

    let own = pr.author == self.user;

    match pr.merged_at {
      Some(merged_at) if !self.in_window(&merged_at) => Gate::Skip(SkipReason::MergedBeforeWindow),
      Some(merged_at) if own => Gate::OwnMerged(YearMonth::of_local(&merged_at)),
      Some(merged_at) => Gate::Inspect {
        merged: Some(YearMonth::of_local(&merged_at)),
      },
      None if own => Gate::Skip(SkipReason::OwnOpen),
      None => Gate::Inspect { merged: None },
    }
  }

  pub fn observe_review(&self, activity: &mut Activity, review: &Review) {
    if !self.is_user(review.author.as_deref()) {
      return;
    }
    match review.submitted_at {
      Some(at) if self.in_window(&at) => activity.note_review(YearMonth::of_local(&at)),
      _ => {}
    }
  }

  pub fn observe_comment(&self, activity: &mut Activity, comment: &IssueComment) {
    if !self.is_user(comment.author.as_deref()) || !self.in_window(&comment.created_at) {
      return;
    }

    let month = YearMonth::of_local(&comment.created_at);
    if comment.body.contains(&self.approval_marker) && activity.month_merged.is_none() {
      activity.mark_merged(month);
    } else {
      activity.note_review(month);
    }
  }
}

/// Classification state for one pull request, committed with `finish`.
#[derive(Clone, Debug)]
pub struct Activity {
  record: PullRequestRecord,
  month_merged: Option<YearMonth>,
  months_reviewed: Vec<YearMonth>,
}

impl Activity {
  pub fn new(repo: &str, pr: &PullRequest) -> Self {
    Self {
      record: PullRequestRecord::new(repo, pr),
      month_merged: None,
      months_reviewed: Vec::new(),
    }
  }

  pub fn mark_merged(&mut self, month: YearMonth) {
    self.month_merged = Some(month);
  }

  pub fn note_review(&mut self, month: YearMonth) {
    if !self.months_reviewed.contains(&month) {
      self.months_reviewed.push(month);
    }
  }

  pub fn finish(self) -> PullRequestRecord {
    PullRequestRecord {
      month_merged: self.month_merged,
      months_reviewed: self.months_reviewed,
      ..self.record
    }
  }
}
