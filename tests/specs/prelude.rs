//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use chrono::Utc;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

pub use chrono::TimeDelta;

/// A temporary directory to hold config and reminders files
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, name: &str, content: &str) -> &Self {
        std::fs::write(self.path().join(name), content).expect("write file");
        self
    }

    /// An `rmd` invocation rooted in this project with a clean environment
    pub fn rmd(&self) -> Cli {
        let mut cmd = Command::cargo_bin("rmd").expect("rmd binary");
        cmd.current_dir(self.path())
            .env_remove("RMD_CONFIG")
            .env_remove("RUST_LOG")
            .timeout(Duration::from_secs(30));
        Cli { cmd }
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Output {
        let output = self.cmd.output().expect("run rmd");
        let out = Output::from(output);
        assert!(
            out.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            out.stdout, out.stderr
        );
        out
    }

    pub fn fails(mut self) -> Output {
        let output = self.cmd.output().expect("run rmd");
        let out = Output::from(output);
        assert!(
            !out.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            out.stdout, out.stderr
        );
        out
    }
}

pub struct Output {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout is JSON")
    }
}

/// RFC 3339 timestamp `delta` from now
pub fn from_now(delta: TimeDelta) -> String {
    (Utc::now() + delta).to_rfc3339()
}

/// One `[[reminder]]` table
pub fn reminder(id: i64, title: &str, at: &str) -> String {
    format!(
        "[[reminder]]\nid = {}\ntitle = \"{}\"\nscheduled_for = \"{}\"\n\n",
        id, title, at
    )
}
