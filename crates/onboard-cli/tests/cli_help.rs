use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("onboard")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("script"))
        .stdout(predicate::str::contains("routes"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--logout-policy"));
}

#[test]
fn test_script_help_lists_steps() {
    cargo_bin_cmd!("onboard")
        .args(["script", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sign-in:EMAIL:PASSWORD"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_unknown_logout_policy_is_rejected() {
    cargo_bin_cmd!("onboard")
        .args(["--logout-policy", "later", "routes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown logout policy"));
}

#[test]
fn test_routes_prints_table() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("onboard")
        .env("ONBOARD_HOME", dir.path())
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("splash"))
        .stdout(predicate::str::contains("login_options"))
        .stdout(predicate::str::contains("clear history to splash (inclusive), single top"));
}
