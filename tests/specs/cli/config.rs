//! `rmd config` specs

use crate::prelude::*;

#[test]
fn defaults_print_as_toml() {
    Project::empty()
        .rmd()
        .args(&["config"])
        .passes()
        .stdout_has("trigger_mode = \"calendar\"")
        .stdout_has("verify_after_schedule = true")
        .stdout_has("fallback_body = \"You have a reminder\"")
        .stdout_has("[channel]")
        .stdout_has("id = \"reminders\"")
        .stdout_has("max_pending = 64")
        .stdout_lacks("utc_offset_minutes");
}

#[test]
fn file_overrides_defaults() {
    let project = Project::empty();
    project.file(
        "rmd.toml",
        "trigger_mode = \"epoch\"\nutc_offset_minutes = 120\n\n[local]\nmax_pending = 5\n",
    );

    project
        .rmd()
        .args(&["--config", "rmd.toml", "config"])
        .passes()
        .stdout_has("trigger_mode = \"epoch\"")
        .stdout_has("utc_offset_minutes = 120")
        .stdout_has("max_pending = 5");
}

#[test]
fn config_path_can_come_from_environment() {
    let project = Project::empty();
    project.file("rmd.toml", "verify_after_schedule = false\n");

    project
        .rmd()
        .env("RMD_CONFIG", "rmd.toml")
        .args(&["config"])
        .passes()
        .stdout_has("verify_after_schedule = false");
}

#[test]
fn json_format_prints_json() {
    let out = Project::empty()
        .rmd()
        .args(&["config", "--format", "json"])
        .passes();

    let json = out.json();
    assert_eq!(json["trigger_mode"], "calendar");
    assert_eq!(json["channel"]["name"], "Reminders");
    assert_eq!(json["local"]["permission"], "undetermined");
}

#[test]
fn unknown_key_is_rejected() {
    let project = Project::empty();
    project.file("rmd.toml", "repeat = \"daily\"\n");

    project
        .rmd()
        .args(&["--config", "rmd.toml", "config"])
        .fails()
        .stderr_has("loading config");
}

#[test]
fn out_of_range_offset_is_rejected() {
    let project = Project::empty();
    project.file("rmd.toml", "utc_offset_minutes = 100000\n");

    project
        .rmd()
        .args(&["--config", "rmd.toml", "config"])
        .fails()
        .stderr_has("utc_offset_minutes out of range");
}

#[test]
fn missing_config_file_fails() {
    Project::empty()
        .rmd()
        .args(&["--config", "nope.toml", "config"])
        .fails()
        .stderr_has("nope.toml");
}
