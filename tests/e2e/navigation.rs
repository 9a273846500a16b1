//! E2E tests for category navigation and history sync

use crate::common::harness::SettingsTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use settings_admin::model::category::CategoryRegistry;
use settings_admin::model::history::{History, Location};
use std::collections::HashMap;

/// Walking the sidebar selects every category in registry order
#[test]
fn test_sidebar_selects_every_category() {
    let mut harness = SettingsTestHarness::new(100, 30).unwrap();
    let registry = CategoryRegistry::builtin(&HashMap::new()).unwrap();

    for category in registry.categories() {
        {
            let state = harness.shell().state();
            assert_eq!(state.active_category, category.key);
            assert_eq!(state.current_settings, category.settings);
        }
        assert_eq!(
            harness.history().location(),
            Location::category(&category.key)
        );

        harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    }

    // One entry per category, no duplicates
    assert_eq!(harness.history().len(), registry.categories().len());
}

#[test]
fn test_selected_category_is_rendered() {
    let mut harness = SettingsTestHarness::at("/email").unwrap();
    harness.render().unwrap();

    harness.assert_screen_contains("System Settings");
    harness.assert_screen_contains("Data Import");
    harness.assert_screen_contains(" Email");
    harness.assert_screen_contains("[x] Use TLS for email");
    harness.assert_screen_contains("[587 ▼]");
}

#[test]
fn test_root_location_opens_first_category() {
    let harness = SettingsTestHarness::at("/").unwrap();
    assert_eq!(harness.shell().state().active_category, "general");
    assert_eq!(harness.history().entries(), vec![Location::category("general")]);
}

#[test]
fn test_unknown_location_on_mount_redirects_without_new_entry() {
    let harness = SettingsTestHarness::at("/nope").unwrap();
    assert_eq!(harness.shell().state().active_category, "general");
    assert_eq!(harness.history().entries(), vec![Location::category("general")]);
}

/// Navigating back to an unregistered path replaces that entry with the
/// first category instead of growing the back stack
#[test]
fn test_pop_to_unknown_path_replaces_entry() {
    let mut harness = SettingsTestHarness::at("/email").unwrap();
    harness.history().push(Location::parse("/unknown"));
    harness.history().push(Location::category("calendar"));

    harness.send_key(KeyCode::Left, KeyModifiers::ALT).unwrap();

    assert_eq!(harness.shell().state().active_category, "general");
    assert_eq!(
        harness.history().entries(),
        vec![
            Location::category("email"),
            Location::category("general"),
            Location::category("calendar"),
        ]
    );
    assert_eq!(harness.history().index(), 1);
}

#[test]
fn test_back_and_forward_restore_categories() {
    let mut harness = SettingsTestHarness::at("/general").unwrap();
    harness.shell_mut().select_category("email");
    harness.shell_mut().select_category("calendar");

    harness.send_key(KeyCode::Left, KeyModifiers::ALT).unwrap();
    assert_eq!(harness.shell().state().active_category, "email");

    harness.send_key(KeyCode::Left, KeyModifiers::ALT).unwrap();
    assert_eq!(harness.shell().state().active_category, "general");

    harness.send_key(KeyCode::Right, KeyModifiers::ALT).unwrap();
    assert_eq!(harness.shell().state().active_category, "email");

    // Pops never add entries
    assert_eq!(harness.history().len(), 3);
}

#[test]
fn test_selecting_new_category_drops_forward_entries() {
    let mut harness = SettingsTestHarness::at("/general").unwrap();
    harness.shell_mut().select_category("email");
    harness.send_key(KeyCode::Left, KeyModifiers::ALT).unwrap();

    harness.shell_mut().select_category("server");
    assert_eq!(
        harness.history().entries(),
        vec![Location::category("general"), Location::category("server")]
    );
}
