//! Help and argument error specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .rmd()
        .args(&["--help"])
        .passes()
        .stdout_has("check")
        .stdout_has("run")
        .stdout_has("config");
}

#[test]
fn missing_subcommand_fails() {
    Project::empty().rmd().fails().stderr_has("Usage");
}

#[test]
fn unknown_subcommand_fails() {
    Project::empty()
        .rmd()
        .args(&["snooze"])
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn unknown_format_fails() {
    Project::empty()
        .rmd()
        .args(&["--format", "yaml", "config"])
        .fails()
        .stderr_has("yaml");
}
