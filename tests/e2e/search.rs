//! E2E tests for settings search

use crate::common::harness::SettingsTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use settings_admin::model::history::History;

#[test]
fn test_search_rewrites_url_and_shows_placeholder() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();

    harness
        .send_key(KeyCode::Char('/'), KeyModifiers::NONE)
        .unwrap();
    harness.type_text("foo bar").unwrap();

    {
        let state = harness.shell().state();
        assert!(state.is_searching());
        assert_eq!(state.search_text, "foo bar");
        assert!(state.current_settings.is_empty());
    }
    assert_eq!(harness.history().location().to_string(), "/search?foo%20bar");

    harness.render().unwrap();
    harness.assert_screen_contains("Search results");
    harness.assert_screen_contains("No settings found");
}

#[test]
fn test_search_results_are_rendered() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    harness
        .send_key(KeyCode::Char('/'), KeyModifiers::NONE)
        .unwrap();
    harness.type_text("language").unwrap();
    harness.render().unwrap();

    harness.assert_screen_contains("Interface language");
    harness.assert_screen_contains("Database language");
    harness.assert_screen_not_contains("Use TLS for email");
}

#[test]
fn test_selecting_category_after_search_clears_search_box() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    harness
        .send_key(KeyCode::Char('/'), KeyModifiers::NONE)
        .unwrap();
    harness.type_text("cache").unwrap();
    assert_eq!(harness.shell().search_box_text(), "cache");

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    harness.shell_mut().select_category("server");

    {
        let state = harness.shell().state();
        assert_eq!(state.active_category, "server");
        assert!(state.search_text.is_empty());
    }
    assert_eq!(harness.shell().search_box_text(), "");

    harness.render().unwrap();
    harness.assert_screen_contains("Search settings");
}

#[test]
fn test_clearing_search_returns_to_last_category() {
    let mut harness = SettingsTestHarness::at("/calendar").unwrap();
    harness
        .send_key(KeyCode::Char('/'), KeyModifiers::NONE)
        .unwrap();
    harness.type_text("tls").unwrap();
    assert!(harness.shell().state().is_searching());

    harness.send_key_repeat(KeyCode::Backspace, 3).unwrap();
    assert_eq!(harness.shell().state().active_category, "calendar");
}

#[test]
fn test_mount_at_search_location_runs_search() {
    let mut harness = SettingsTestHarness::at("/search?email%20port").unwrap();
    assert_eq!(harness.shell().search_box_text(), "email port");
    assert_eq!(
        harness.shell_mut().panel().setting_names(),
        vec!["keyEmailPort"]
    );
    assert_eq!(harness.history().len(), 1);
}

#[test]
fn test_back_from_category_restores_search() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    harness.shell_mut().search("Cache strategy");
    assert_eq!(
        harness.history().location().to_string(),
        "/search?cache%20strategy"
    );
    harness.shell_mut().select_category("email");

    harness.send_key(KeyCode::Left, KeyModifiers::ALT).unwrap();

    assert!(harness.shell().state().is_searching());
    assert_eq!(harness.shell().search_box_text(), "cache strategy");
    assert_eq!(
        harness.shell_mut().panel().setting_names(),
        vec!["keyCacheStrategy"]
    );
}
