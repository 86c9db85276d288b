// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse the --repositories allow-list and decide whether a listed repository is in scope
// role: configuration/matcher
// inputs: Comma-separated `owner/name` entries; Repository descriptors from the upstream listing
// outputs: RepoFilter with exact (owner, name) matching
// invariants: Every entry splits on `/` into exactly two non-empty parts; parsing fails before any network call otherwise
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Result, bail};

use crate::model::Repository;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoFilter {
  entries: Vec<(String, String)>,
}

impl RepoFilter {
  pub fn parse(raw: &str) -> Result<Self> {
    let mut entries = Vec::new();

    for entry in raw.split(',') {
      let entry = entry.trim();
      let parts: Vec<&str> = entry.split('/').collect();

      if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        bail!("malformed repository entry `{}` in --repositories, expected owner/name", entry);
      }
      entries.push((parts[0].to_string(), parts[1].to_string()));
    }

    Ok(Self { entries })
  }

  pub fn matches(&self, repo: &Repository) -> bool {
    self
      .entries
      .iter()
      .any(|(owner, name)| *owner == repo.owner && *name == repo.name)
  }

  /// Entries as `owner/name`, in the order given.
  pub fn slugs(&self) -> Vec<String> {
    self.entries.iter().map(|(o, n)| format!("{}/{}", o, n)).collect()
  }
}
