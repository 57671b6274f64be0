// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeDelta;
use rmd_core::{CalendarTrigger, ReminderRequest, SequentialHandleGen, FALLBACK_BODY};

fn granted() -> LocalConfig {
    LocalConfig {
        permission: PermissionStatus::Granted,
        ..LocalConfig::default()
    }
}

fn platform(kind: PlatformKind, config: &LocalConfig) -> LocalPlatform<SequentialHandleGen> {
    LocalPlatform::with_handle_gen(
        kind,
        CalendarZone::Local,
        config,
        SequentialHandleGen::default(),
    )
}

fn content(id: i64) -> NotificationContent {
    let reminder = ReminderRequest::new(id, format!("reminder {}", id), Utc::now());
    NotificationContent::for_reminder(&reminder, FALLBACK_BODY)
}

fn in_secs(secs: i64) -> Trigger {
    Trigger::Date {
        epoch_millis: (Utc::now() + TimeDelta::seconds(secs)).timestamp_millis(),
        channel_id: None,
    }
}

#[tokio::test]
async fn undetermined_permission_blocks_schedule() {
    let platform = platform(PlatformKind::Desktop, &LocalConfig::default());

    let err = platform.schedule(&content(1), &in_secs(60)).await.unwrap_err();
    assert!(matches!(err, PlatformError::PermissionDenied));
}

#[tokio::test]
async fn request_grants_undetermined_permission() {
    let platform = platform(PlatformKind::Desktop, &LocalConfig::default());

    assert_eq!(
        platform.request_permission().await.unwrap(),
        PermissionStatus::Granted
    );
    assert_eq!(
        platform.permission_status().await.unwrap(),
        PermissionStatus::Granted
    );
}

#[tokio::test]
async fn request_remembers_earlier_denial() {
    let config = LocalConfig {
        permission: PermissionStatus::Denied,
        ..LocalConfig::default()
    };
    let platform = platform(PlatformKind::Desktop, &config);

    assert_eq!(
        platform.request_permission().await.unwrap(),
        PermissionStatus::Denied
    );
}

#[tokio::test(start_paused = true)]
async fn pending_entry_fires_and_leaves_queue() {
    let platform = platform(PlatformKind::Desktop, &granted());
    let mut events = platform.subscribe();

    let handle = platform.schedule(&content(7), &in_secs(3600)).await.unwrap();
    let pending = platform.list_scheduled().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].handle, handle);

    tokio::time::sleep(Duration::from_secs(3601)).await;

    assert!(platform.list_scheduled().await.unwrap().is_empty());
    assert_eq!(platform.delivered().len(), 1);
    match events.recv().await.unwrap() {
        PlatformEvent::Received(notification) => {
            assert_eq!(notification.handle, handle);
            assert_eq!(notification.content.title, "reminder 7");
        }
        other => panic!("expected received event, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn background_delivery_emits_no_received_event() {
    let platform = platform(PlatformKind::Desktop, &granted());
    platform.set_foreground(false);
    let mut events = platform.subscribe();

    let handle = platform.schedule(&content(1), &in_secs(10)).await.unwrap();
    tokio::time::sleep(Duration::from_secs(11)).await;

    assert_eq!(platform.delivered().len(), 1);
    assert!(events.try_recv().is_err());

    platform.respond(&handle, "snooze").unwrap();
    match events.try_recv().unwrap() {
        PlatformEvent::Response(response) => {
            assert_eq!(response.notification.handle, handle);
            assert_eq!(response.action, "snooze");
        }
        other => panic!("expected response event, got {:?}", other),
    }
}

#[tokio::test]
async fn respond_to_undelivered_handle_fails() {
    let platform = platform(PlatformKind::Desktop, &granted());

    let err = platform
        .respond(&NotificationHandle::new("missing"), "default")
        .unwrap_err();
    assert!(matches!(err, PlatformError::NotDelivered(_)));
}

#[tokio::test(start_paused = true)]
async fn cancelled_entry_never_fires() {
    let platform = platform(PlatformKind::Desktop, &granted());

    let handle = platform.schedule(&content(1), &in_secs(10)).await.unwrap();
    platform.cancel(&handle).await.unwrap();
    tokio::time::sleep(Duration::from_secs(11)).await;

    assert!(platform.list_scheduled().await.unwrap().is_empty());
    assert!(platform.delivered().is_empty());
}

#[tokio::test(start_paused = true)]
async fn delivery_history_is_bounded() {
    let config = LocalConfig {
        max_pending: DELIVERED_HISTORY + 2,
        ..granted()
    };
    let platform = platform(PlatformKind::Desktop, &config);
    let mut handles = Vec::new();
    // Staggered so delivery order is schedule order
    for id in 0..(DELIVERED_HISTORY as i64 + 2) {
        handles.push(platform.schedule(&content(id), &in_secs(id + 1)).await.unwrap());
    }
    tokio::time::sleep(Duration::from_secs(DELIVERED_HISTORY as u64 + 5)).await;

    let delivered = platform.delivered();
    assert_eq!(delivered.len(), DELIVERED_HISTORY);
    assert!(delivered.iter().all(|n| n.handle != handles[0]));
    assert!(matches!(
        platform.respond(&handles[0], "default"),
        Err(PlatformError::NotDelivered(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn take_delivered_drains_history() {
    let platform = platform(PlatformKind::Desktop, &granted());
    let handle = platform.schedule(&content(1), &in_secs(5)).await.unwrap();
    tokio::time::sleep(Duration::from_secs(6)).await;

    let taken = platform.take_delivered();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].handle, handle);
    assert!(platform.delivered().is_empty());
}

#[tokio::test]
async fn cancel_unknown_handle_is_silent() {
    let platform = platform(PlatformKind::Desktop, &granted());
    platform
        .cancel(&NotificationHandle::new("never-issued"))
        .await
        .unwrap();
}

#[tokio::test]
async fn cancel_all_empties_queue() {
    let platform = platform(PlatformKind::Desktop, &granted());
    for id in 0..3 {
        platform.schedule(&content(id), &in_secs(60)).await.unwrap();
    }

    platform.cancel_all().await.unwrap();

    assert!(platform.list_scheduled().await.unwrap().is_empty());
}

#[tokio::test]
async fn quota_rejects_extra_entries() {
    let config = LocalConfig {
        max_pending: 2,
        ..granted()
    };
    let platform = platform(PlatformKind::Desktop, &config);
    platform.schedule(&content(1), &in_secs(60)).await.unwrap();
    platform.schedule(&content(2), &in_secs(60)).await.unwrap();

    let err = platform.schedule(&content(3), &in_secs(60)).await.unwrap_err();
    assert!(matches!(err, PlatformError::QuotaExceeded(2)));
}

#[tokio::test]
async fn android_requires_declared_channel() {
    let platform = platform(PlatformKind::Android, &granted());
    let trigger = Trigger::Date {
        epoch_millis: (Utc::now() + TimeDelta::seconds(60)).timestamp_millis(),
        channel_id: Some("reminders".to_string()),
    };

    let err = platform.schedule(&content(1), &trigger).await.unwrap_err();
    assert!(matches!(err, PlatformError::UnknownChannel(id) if id == "reminders"));

    platform
        .set_channel(&ChannelConfig::reminders())
        .await
        .unwrap();
    platform.schedule(&content(1), &trigger).await.unwrap();
    assert!(platform.channel("reminders").is_some());
}

#[tokio::test]
async fn desktop_ignores_channels() {
    let platform = platform(PlatformKind::Desktop, &granted());
    platform
        .set_channel(&ChannelConfig::reminders())
        .await
        .unwrap();
    assert!(platform.channel("reminders").is_none());
}

#[tokio::test]
async fn unresolvable_trigger_is_rejected() {
    let platform = platform(PlatformKind::Desktop, &granted());
    let trigger = Trigger::Calendar(CalendarTrigger {
        year: 2030,
        month: 13,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
        channel_id: None,
    });

    let err = platform.schedule(&content(1), &trigger).await.unwrap_err();
    assert!(matches!(err, PlatformError::InvalidTrigger(_)));
}

#[tokio::test]
async fn revoked_permission_rejects_schedule() {
    let platform = platform(PlatformKind::Desktop, &granted());
    platform.set_permission(PermissionStatus::Denied);

    let err = platform.schedule(&content(1), &in_secs(60)).await.unwrap_err();
    assert!(matches!(err, PlatformError::PermissionDenied));
}
