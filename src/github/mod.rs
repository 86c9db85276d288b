// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the GitHub REST collaborator (API seam, backends, pagination)
// role: upstream/namespace
// outputs: GithubApi trait, HTTP and fixture backends, page iteration
// invariants: Every upstream failure surfaces as an error; nothing here retries or caches
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod pages;

pub use api::{GithubApi, build_api};
pub use pages::pages;
