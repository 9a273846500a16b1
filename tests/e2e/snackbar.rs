//! E2E tests for snackbar messages

use crate::common::harness::SettingsTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use settings_admin::model::action::Action;
use std::time::Duration;

#[test]
fn test_snackbar_hides_after_delay() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    harness.publish(Action::ShowSnackbarMessage("Hello there".to_string()));
    harness.render().unwrap();
    harness.assert_screen_contains("Hello there");

    assert!(!harness.advance_time(Duration::from_millis(1000)));
    harness.render().unwrap();
    harness.assert_screen_contains("Hello there");

    assert!(harness.advance_time(Duration::from_millis(300)));
    harness.render().unwrap();
    harness.assert_screen_not_contains("Hello there");

    // The text is kept after closing
    let state = harness.shell().state();
    assert!(!state.show_snackbar);
    assert_eq!(state.snackbar_message, "Hello there");
}

#[test]
fn test_escape_closes_snackbar() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    harness.publish(Action::ShowSnackbarMessage("Saved".to_string()));
    assert!(harness.shell().state().show_snackbar);

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert!(!harness.shell().state().show_snackbar);
}

#[test]
fn test_new_message_restarts_timer() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    harness.publish(Action::ShowSnackbarMessage("First".to_string()));
    harness.advance_time(Duration::from_millis(1000));

    harness.publish(Action::ShowSnackbarMessage("Second".to_string()));
    assert!(!harness.advance_time(Duration::from_millis(1000)));
    assert!(harness.shell().state().show_snackbar);
    assert_eq!(harness.shell().state().snackbar_message, "Second");
}
