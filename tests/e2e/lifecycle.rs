//! E2E tests for mounting, unmounting and quitting

use crate::common::harness::SettingsTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use settings_admin::model::action::{Action, ActionKind};
use settings_admin::model::history::{History, Location};

#[test]
fn test_unmount_disposes_every_subscription() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();

    // Search service and saver stay mounted; the shell adds two
    assert_eq!(harness.bus().subscriber_count(ActionKind::SetCategory), 1);
    assert_eq!(harness.bus().total_subscribers(), 4);
    assert_eq!(harness.history().listener_count(), 1);
    assert_eq!(harness.options().subscriber_count(), 1);

    harness.shell_mut().unmount();
    assert!(!harness.shell().is_mounted());

    assert_eq!(harness.bus().subscriber_count(ActionKind::SetCategory), 0);
    assert_eq!(harness.bus().total_subscribers(), 2);
    assert_eq!(harness.history().listener_count(), 0);
    assert_eq!(harness.options().subscriber_count(), 0);
}

#[test]
fn test_publish_after_unmount_changes_nothing() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    harness.shell_mut().unmount();
    let before = harness.shell().state().clone();

    harness.publish(Action::ShowSnackbarMessage("late".to_string()));
    harness.publish(Action::select("email"));
    harness.publish(Action::SearchSettings("port".to_string()));
    harness.history().push(Location::category("calendar"));
    harness.history().back();

    assert_eq!(*harness.shell().state(), before);
    harness.load_option_sets().unwrap();
    assert_eq!(*harness.shell().state(), before);
}

#[test]
fn test_unmount_twice_is_harmless() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    harness.shell_mut().unmount();
    harness.shell_mut().unmount();
    assert_eq!(harness.bus().total_subscribers(), 2);
}

#[test]
fn test_q_quits_outside_search() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    harness
        .send_key(KeyCode::Char('/'), KeyModifiers::NONE)
        .unwrap();
    harness
        .send_key(KeyCode::Char('q'), KeyModifiers::NONE)
        .unwrap();
    assert!(!harness.should_quit());

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    harness
        .send_key(KeyCode::Char('q'), KeyModifiers::NONE)
        .unwrap();
    assert!(harness.should_quit());
}
