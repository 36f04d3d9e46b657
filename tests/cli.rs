use std::process::Command;  // Run programs
use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("envlink")?;

    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("associate"))
        .stdout(predicate::str::contains("dissociate"))
        .stdout(predicate::str::contains("env-of"));

    Ok(())
}

#[test]
fn test_cli_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("envlink")?;

    cmd.arg("frobnicate");

    cmd.assert().failure();

    Ok(())
}

#[test]
fn test_cli_requires_configuration() -> Result<(), Box<dyn std::error::Error>> {
    let tmpdir = std::env::temp_dir().join(format!("envlink-test-config-{}", std::process::id()));
    std::fs::create_dir_all(&tmpdir)?;

    let mut cmd = Command::cargo_bin("envlink")?;

    // no config.toml in the working directory, so this has to fail before
    // even trying to connect to a database
    cmd.current_dir(&tmpdir).arg("db").arg("envvars");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Loading configuration failed"));

    std::fs::remove_dir_all(&tmpdir)?;

    Ok(())
}

#[test]
fn test_cli_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("envlink")?;

    // completions work without a configuration
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("envlink"));

    Ok(())
}
