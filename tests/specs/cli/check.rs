//! `rmd check` specs

use crate::prelude::*;

#[test]
fn future_and_past_reminders_are_classified() {
    let project = Project::empty();
    let text = reminder(7, "Call Maya", &from_now(TimeDelta::hours(1)))
        + &reminder(8, "Past reminder", &from_now(-TimeDelta::hours(1)));
    project.file("reminders.toml", &text);

    let out = project
        .rmd()
        .args(&["check", "reminders.toml"])
        .passes();

    let lines: Vec<&str> = out.stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("7 "), "{}", lines[0]);
    assert!(lines[0].contains("schedule"));
    assert!(lines[0].ends_with("Call Maya"));
    assert!(lines[1].starts_with("8 "), "{}", lines[1]);
    assert!(lines[1].contains("past"));
}

#[test]
fn json_rows_carry_verdicts() {
    let project = Project::empty();
    project.file(
        "reminders.toml",
        &reminder(42, "Pay rent", &from_now(TimeDelta::days(1))),
    );

    let out = project
        .rmd()
        .args(&["--format", "json", "check", "reminders.toml"])
        .passes();

    let json = out.json();
    assert_eq!(json[0]["id"], 42);
    assert_eq!(json[0]["verdict"], "schedule");
}

#[test]
fn empty_title_fails_check() {
    let project = Project::empty();
    project.file(
        "reminders.toml",
        &reminder(5, "  ", &from_now(TimeDelta::hours(1))),
    );

    project
        .rmd()
        .args(&["check", "reminders.toml"])
        .fails()
        .stdout_has("invalid")
        .stderr_has("1 invalid reminder(s)");
}

#[test]
fn unparseable_time_names_the_reminder() {
    let project = Project::empty();
    project.file("reminders.toml", &reminder(3, "Oops", "next tuesday"));

    project
        .rmd()
        .args(&["check", "reminders.toml"])
        .fails()
        .stderr_has("reminder 3");
}

#[test]
fn naive_times_use_configured_offset() {
    let project = Project::empty();
    project.file("rmd.toml", "utc_offset_minutes = 60\n");
    project.file("reminders.toml", &reminder(1, "Far off", "2999-01-01 10:00"));

    project
        .rmd()
        .args(&["--config", "rmd.toml", "check", "reminders.toml"])
        .passes()
        .stdout_has("2999-01-01T09:00:00+00:00");
}

#[test]
fn missing_file_fails() {
    Project::empty()
        .rmd()
        .args(&["check", "missing.toml"])
        .fails()
        .stderr_has("missing.toml");
}
