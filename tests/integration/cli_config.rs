use predicates::prelude::*;

fn cmd() -> assert_cmd::Command {
  let mut cmd = test_support::cmd_bin("pr-activity-report");
  cmd.env(test_support::FIXTURES_ENV, test_support::fixture_path("activity.json"));
  cmd
}

#[test]
fn missing_user_fails_before_any_output() {
  cmd()
    .args(["--repositories", "acme/widgets"])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("missing --user"));
}

#[test]
fn missing_repositories_fails() {
  cmd()
    .args(["--user", "u"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("missing --repositories"));
}

#[test]
fn malformed_repository_entry_fails() {
  cmd()
    .args(["--user", "u", "--repositories", "acme/widgets,acme"])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("malformed repository entry `acme`"));
}

#[test]
fn zero_months_is_rejected() {
  cmd()
    .args(["--user", "u", "--repositories", "acme/widgets", "--months", "0"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--months"));
}

#[test]
fn bad_now_override_is_rejected() {
  cmd()
    .args(["--user", "u", "--repositories", "acme/widgets", "--now-override", "tomorrow"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--now-override"));
}

#[test]
fn no_token_anywhere_is_a_config_error() {
  let empty_path = tempfile::tempdir().unwrap();
  test_support::cmd_bin("pr-activity-report")
    // Hide any `gh` binary on the developer's machine.
    .env("PATH", empty_path.path())
    .args(["--user", "u", "--repositories", "acme/widgets"])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("missing token"));
}
