#![allow(dead_code)]

use assert_cmd::Command;
use dreamfund::wishlist::{Goal, Priority};
use tempfile::TempDir;

pub fn goal(name: &str, target: u64, saved: u64, priority: Priority) -> Goal {
    let mut goal = Goal::new(name, target, "Shopping", priority);
    goal.saved = saved;
    goal
}

/// Each test gets its own application home, removed when the guard drops.
pub fn temp_home() -> TempDir {
    TempDir::new().expect("create temp dir")
}

/// The shell binary in script mode, isolated from the user's home and credentials.
pub fn script_cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dreamfund_cli").expect("binary built");
    cmd.env("DREAMFUND_CLI_SCRIPT", "1")
        .env("DREAMFUND_HOME", home.path())
        .env("RUST_LOG", "off")
        .env_remove("GEMINI_API_KEY");
    cmd
}
