#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn moodjour_cmd() -> Command {
    let mut cmd = Command::cargo_bin("moodjour").unwrap();
    cmd.env_remove("MOODJOUR_ROOT");
    cmd.env_remove("MOODJOUR_LOG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a stored log document straight into `logs/`
pub fn write_log(root: &Path, filename: &str, json: &str) {
    let logs = root.join("logs");
    fs::create_dir_all(&logs).unwrap();
    fs::write(logs.join(filename), json).unwrap();
}
