//! Integration tests for the splitstat binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PAYLOAD: &str = "tests/fixtures/payload.json";
const NOW: &str = "2024-03-15T08:00:00Z";

fn splitstat() -> Command {
    Command::cargo_bin("splitstat").unwrap()
}

#[test]
fn test_text_report() {
    splitstat()
        .args([PAYLOAD, "--now", NOW])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== A/B Tests (2) ==="))
        .stdout(predicate::str::contains(
            "Estimated time remaining: ready for a decision (100% complete)",
        ))
        .stdout(predicate::str::contains(
            "Estimated time remaining: 17 days (49% complete, limited by statistical power)",
        ))
        .stdout(predicate::str::contains(
            "Traffic rate: 222 visitors/day, est. remaining visitors: 3778",
        ))
        .stdout(predicate::str::contains(
            "Orange CTA: 1000 samples, 150 conversions, 15.00%, \
             lift +50.00% Significant Improvement (99.1% confidence)",
        ))
        .stdout(predicate::str::contains("=== Campaigns (1) ==="))
        .stdout(predicate::str::contains("  - Returning Visitor Banner [31870001]"))
        .stdout(predicate::str::contains("Holiday Gifting").not())
        .stdout(predicate::str::contains("Onboarding Email").not());
}

#[test]
fn test_search_filter() {
    splitstat()
        .args([PAYLOAD, "--now", NOW, "--search", "pricing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pricing Page Layout"))
        .stdout(predicate::str::contains("Checkout Button Color").not())
        .stdout(predicate::str::contains("Campaigns").not());
}

#[test]
fn test_search_matches_campaign_through_experience() {
    splitstat()
        .args([PAYLOAD, "--now", NOW, "--search", "banner clicks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Campaigns (1) ===\n\nReturning Visitors [9001]"))
        .stdout(predicate::str::contains("A/B Tests").not());
}

#[test]
fn test_no_matches() {
    splitstat()
        .args([PAYLOAD, "--search", "zzz-no-match"])
        .assert()
        .success()
        .stdout("No running experiments found.\n");
}

#[test]
fn test_json_output() {
    let output = splitstat()
        .args([PAYLOAD, "--now", NOW, "--format", "json", "--minimum-duration", "30"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["minimum_duration_days"], 30);
    assert_eq!(report["a_b_tests"][0]["forecast"]["days_remaining"], 16);
    assert_eq!(report["a_b_tests"][0]["forecast"]["limiting_factor"], "MinimumDuration");
}

#[test]
fn test_settings_file() {
    splitstat()
        .args([PAYLOAD, "--now", NOW, "--search", "checkout"])
        .args(["--settings", "tests/fixtures/settings.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Estimated time remaining: 7 days (67% complete, limited by minimum duration)",
        ));
}

#[test]
fn test_save_settings() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json");

    splitstat()
        .args([PAYLOAD, "--minimum-duration", "45", "--save-settings", "--settings"])
        .arg(&settings)
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings).unwrap()).unwrap();
    assert_eq!(saved["minimum_duration_days"], 45);
}

#[test]
fn test_missing_payload_fails() {
    splitstat()
        .arg("tests/fixtures/does-not-exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn test_invalid_now_fails() {
    splitstat()
        .args([PAYLOAD, "--now", "last week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}
