use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rum"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute rum");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("automation"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rum"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute rum");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rum"));
}

#[test]
fn help_lists_every_subcommand() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rum"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute rum");

    // Assert
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "init",
        "windows",
        "show",
        "send-key",
        "type-key",
        "confirm",
        "prompt",
        "metrics",
        "console",
        "watch-clipboard",
    ] {
        assert!(stdout.contains(name), "missing subcommand {name}");
    }
}

#[test]
fn send_key_requires_a_key() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rum"));
    cmd.arg("send-key");

    // Act
    let output = cmd.output().expect("failed to execute rum");

    // Assert
    assert!(!output.status.success());
}

#[cfg(windows)]
#[test]
fn metrics_json_reports_nonzero_sizes() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rum"));
    cmd.args(["metrics", "--json"]);

    // Act
    let output = cmd.output().expect("failed to execute rum");

    // Assert
    assert!(output.status.success());
    let metrics: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("metrics output is not JSON");
    assert!(metrics["screen_width"].as_i64().unwrap() > 0);
    assert!(metrics["screen_height"].as_i64().unwrap() > 0);
    let area = &metrics["work_area"];
    assert!(area["right"].as_i64().unwrap() > area["left"].as_i64().unwrap());
    assert!(area["bottom"].as_i64().unwrap() > area["top"].as_i64().unwrap());
}

#[cfg(windows)]
#[test]
fn windows_json_lists_handles() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rum"));
    cmd.args(["windows", "--json"]);

    // Act
    let output = cmd.output().expect("failed to execute rum");

    // Assert
    assert!(output.status.success());
    let rows: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("windows output is not JSON");
    let rows = rows.as_array().expect("expected a JSON array");
    assert!(!rows.is_empty(), "a desktop always has top-level windows");
    assert!(rows.iter().all(|row| row["handle"].as_u64().is_some()));
}
