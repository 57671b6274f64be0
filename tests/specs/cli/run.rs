//! `rmd run` specs

use crate::prelude::*;

#[test]
fn reminder_is_scheduled_then_delivered() {
    let project = Project::empty();
    let text = reminder(7, "Call Maya", &from_now(TimeDelta::seconds(2)));
    project.file("reminders.toml", &text);

    project
        .rmd()
        .args(&["run", "reminders.toml"])
        .passes()
        .stdout_has("scheduled 7 Call Maya")
        .stdout_has("delivered Call Maya: You have a reminder")
        .stdout_lacks("(background)");
}

#[test]
fn background_delivery_is_marked() {
    let project = Project::empty();
    project.file(
        "reminders.toml",
        &reminder(1, "Kettle", &from_now(TimeDelta::seconds(2))),
    );

    project
        .rmd()
        .args(&["run", "--background", "reminders.toml"])
        .passes()
        .stdout_has("delivered Kettle: You have a reminder (background)");
}

#[test]
fn past_reminder_is_skipped_with_warning() {
    let project = Project::empty();
    project.file(
        "reminders.toml",
        &reminder(8, "Past reminder", &from_now(-TimeDelta::hours(1))),
    );

    project
        .rmd()
        .args(&["run", "reminders.toml"])
        .passes()
        .stdout_has("skipped   8 Past reminder (past)")
        .stderr_has("cannot schedule notification for past date");
}

#[test]
fn json_schedule_rows_have_null_handle_for_past() {
    let project = Project::empty();
    project.file(
        "reminders.toml",
        &reminder(8, "Past reminder", &from_now(-TimeDelta::minutes(5))),
    );

    let out = project
        .rmd()
        .args(&["--format", "json", "run", "reminders.toml"])
        .passes();

    let json = out.json();
    assert_eq!(json[0]["id"], 8);
    assert!(json[0]["handle"].is_null());
    assert_eq!(json[0]["verified"], false);
}

#[test]
fn denied_permission_fails_run() {
    let project = Project::empty();
    project.file("rmd.toml", "[local]\npermission = \"denied\"\n");
    project.file(
        "reminders.toml",
        &reminder(1, "Never", &from_now(TimeDelta::hours(1))),
    );

    project
        .rmd()
        .args(&["--config", "rmd.toml", "run", "reminders.toml"])
        .fails()
        .stderr_has("notification permission not granted");
}

#[test]
fn quota_overflow_fails_run() {
    let project = Project::empty();
    project.file("rmd.toml", "[local]\nmax_pending = 1\n");
    let text = reminder(1, "First", &from_now(TimeDelta::hours(1)))
        + &reminder(2, "Second", &from_now(TimeDelta::hours(2)));
    project.file("reminders.toml", &text);

    project
        .rmd()
        .args(&["--config", "rmd.toml", "run", "reminders.toml"])
        .fails()
        .stderr_has("failed to schedule notification")
        .stderr_has("quota");
}

#[test]
fn empty_title_fails_run() {
    let project = Project::empty();
    project.file(
        "reminders.toml",
        &reminder(5, "", &from_now(TimeDelta::hours(1))),
    );

    project
        .rmd()
        .args(&["run", "reminders.toml"])
        .fails()
        .stderr_has("reminder 5 has an empty title");
}
