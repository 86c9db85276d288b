use predicates::prelude::*;

const NOW: &str = "2024-02-15T12:00:00Z";

fn report_cmd() -> assert_cmd::Command {
  let mut cmd = test_support::cmd_bin("pr-activity-report");
  cmd
    .env(test_support::FIXTURES_ENV, test_support::fixture_path("activity.json"))
    .env("TZ", "UTC");
  cmd
}

#[test]
fn report_buckets_activity_by_month() {
  let out = report_cmd()
    .args([
      "--user",
      "u",
      "--repositories",
      "acme/widgets, acme/gadgets",
      "--now-override",
      NOW,
    ])
    .output()
    .unwrap();

  assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

  let expected = "\
month: January 2024
  own merged: 0
  merged/approved: 1
    acme/gadgets#11: New API [merged: January 2024] [reviewed: February 2024]
  reviewed: 3
    acme/widgets#7: Tidy docs [merged: February 2024] [reviewed: January 2024]
    acme/widgets#5: Refactor parser [reviewed: January 2024]
    acme/gadgets#12: Bump deps [merged: February 2024] [reviewed: January 2024, February 2024]
month: February 2024
  own merged: 1
    acme/widgets#9: Add caching
  merged/approved: 2
    acme/widgets#7: Tidy docs [merged: February 2024] [reviewed: January 2024]
    acme/gadgets#12: Bump deps [merged: February 2024] [reviewed: January 2024, February 2024]
  reviewed: 1
    acme/gadgets#11: New API [merged: January 2024] [reviewed: February 2024]
";
  assert_eq!(String::from_utf8_lossy(&out.stdout), expected);
}

#[test]
fn progress_goes_to_stderr_only() {
  report_cmd()
    .args(["--user", "u", "--repositories", "acme/widgets", "--now-override", NOW])
    .assert()
    .success()
    .stdout(predicate::str::contains("repo: acme/widgets").not())
    .stderr(predicate::str::contains("repo: acme/widgets"))
    .stderr(predicate::str::contains("pr #9, state closed: Add caching"))
    // The listing stops at #4; #3 on the next page is never fetched.
    .stderr(predicate::str::contains("pr #3").not());
}

#[test]
fn quiet_silences_progress() {
  report_cmd()
    .args(["-q", "--user", "u", "--repositories", "acme/widgets", "--now-override", NOW])
    .assert()
    .success()
    .stdout(predicate::str::contains("month: February 2024"))
    .stderr(predicate::str::contains("repo:").not());
}

#[test]
fn single_month_window_drops_january() {
  let out = report_cmd()
    .args([
      "--user",
      "u",
      "--repositories",
      "acme/widgets,acme/gadgets",
      "--months",
      "1",
      "--now-override",
      NOW,
    ])
    .output()
    .unwrap();

  assert!(out.status.success());
  let stdout = String::from_utf8_lossy(&out.stdout);
  assert!(!stdout.contains("January 2024"), "{}", stdout);
  assert!(stdout.starts_with("month: February 2024\n"));
  assert!(stdout.contains("acme/widgets#9: Add caching"));
}

#[test]
fn unknown_repository_yields_empty_report_and_warning() {
  report_cmd()
    .args(["--user", "u", "--repositories", "acme/nowhere", "--now-override", NOW])
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("acme/nowhere"));
}
