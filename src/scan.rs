// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Walk matched repositories and their pull requests, classify each one, and fold the results into month buckets
// role: processing/orchestrator
// inputs: GithubApi backend, Classifier (user, window start, approval marker), RepoFilter
// outputs: StatsAggregator with every in-window activity of the tracked user
// side_effects: Upstream calls through GithubApi; progress lines via tracing
// invariants:
// - Repositories, pull requests, reviews and comments are processed sequentially in listing order
// - A pull request listing stops fetching pages once an item older than the window is seen
// - Merging accounts are only resolved for someone else's pull request merged inside the window
// errors: First upstream or record error aborts the scan; nothing partial is returned
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::classify::{Activity, Classifier, Gate, SkipReason};
use crate::github::{GithubApi, pages};
use crate::model::{IssueComment, PullRequest, PullRequestRecord, Repository, Review, merged_by_login};
use crate::repo_filter::RepoFilter;
use crate::stats::{Category, StatsAggregator};

pub fn scan(api: &dyn GithubApi, filter: &RepoFilter, classifier: &Classifier) -> Result<StatsAggregator> {
  let mut stats = StatsAggregator::new();
  let mut unseen: BTreeSet<String> = filter.slugs().into_iter().collect();

  for items in pages(|page| api.list_repositories(page)) {
    for item in items.context("listing repositories")? {
      let repo = Repository::from_json(&item).context("reading repository listing")?;
      if !filter.matches(&repo) {
        continue;
      }
      unseen.remove(&repo.slug());
      scan_repository(api, &repo, classifier, &mut stats)?;
    }
  }

  for slug in unseen {
    warn!(repo = %slug, "repository not found among those visible to the token");
  }

  Ok(stats)
}

fn scan_repository(
  api: &dyn GithubApi,
  repo: &Repository,
  classifier: &Classifier,
  stats: &mut StatsAggregator,
) -> Result<()> {
  let slug = repo.slug();
  info!("repo: {}", slug);

  let mut listing = pages(|page| api.list_pulls(&repo.owner, &repo.name, page));

  while let Some(items) = listing.next() {
    let items = items.with_context(|| format!("listing pull requests of {}", slug))?;

    for item in items {
      let pr = PullRequest::from_json(&item).with_context(|| format!("reading pull requests of {}", slug))?;
      info!("pr #{}, state {}: {}", pr.number, pr.state, pr.title);

      match classifier.gate(&pr) {
        Gate::OutOfWindow => {
          // Sorted by update time: later pages are older still.
          listing.stop();
        }
        Gate::Skip(SkipReason::MergedBeforeWindow) => {
          debug!(pr = pr.number, "merged before the window");
        }
        Gate::Skip(SkipReason::OwnOpen) => {
          debug!(pr = pr.number, "skipping own open pull request");
        }
        Gate::OwnMerged(month) => {
          if stats.add_own_merged(month, PullRequestRecord::new(&slug, &pr)) {
            debug!(pr = pr.number, category = ?Category::OwnMerged, %month, "added");
          }
        }
        Gate::Inspect { merged } => {
          let record = inspect(api, repo, &pr, merged, classifier)
            .with_context(|| format!("inspecting {}#{}", slug, pr.number))?;
          for (category, month) in stats.fold(record) {
            debug!(pr = pr.number, ?category, %month, "added");
          }
        }
      }
    }
  }

  Ok(())
}

fn inspect(
  api: &dyn GithubApi,
  repo: &Repository,
  pr: &PullRequest,
  merged: Option<crate::model::YearMonth>,
  classifier: &Classifier,
) -> Result<PullRequestRecord> {
  let mut activity = Activity::new(&repo.slug(), pr);

  if let Some(month) = merged {
    let detail = api.get_pull(&repo.owner, &repo.name, pr.number)?;
    if merged_by_login(&detail)? == classifier.user() {
      activity.mark_merged(month);
    }
  }

  for items in pages(|page| api.list_reviews(&repo.owner, &repo.name, pr.number, page)) {
    for item in items? {
      classifier.observe_review(&mut activity, &Review::from_json(&item)?);
    }
  }

  for items in pages(|page| api.list_issue_comments(&repo.owner, &repo.name, pr.number, page)) {
    for item in items? {
      classifier.observe_comment(&mut activity, &IssueComment::from_json(&item)?);
    }
  }

  Ok(activity.finish())
}
