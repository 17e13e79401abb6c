#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with HOME/APPDATA pointed at `home` so the real
/// configuration is never touched.
pub fn rsw(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("rsplitwatch");
    cmd.env("HOME", home)
        .env("APPDATA", home)
        .env("RSPLITWATCH_LOG_DIR", home);
    cmd
}

/// Create an empty, unique home directory inside the system temp dir
pub fn setup_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rsplitwatch_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path.to_string_lossy().to_string()
}

/// Path of the config file inside a test home
pub fn config_file(home: &str) -> PathBuf {
    let dir = if cfg!(target_os = "windows") {
        PathBuf::from(home).join("rsplitwatch")
    } else {
        PathBuf::from(home).join(".rsplitwatch")
    };
    dir.join("rsplitwatch.conf")
}
