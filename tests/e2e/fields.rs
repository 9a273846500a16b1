//! E2E tests for editing settings through form fields

use crate::common::harness::{HarnessOptions, SettingsTestHarness};
use crossterm::event::{KeyCode, KeyModifiers};
use serde_json::{json, Value};
use settings_admin::model::action::Action;
use settings_admin::services::persistence::{
    PersistError, SettingsApi, SettingsDocument, SharedSettingsApi,
};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

fn focus_fields(harness: &mut SettingsTestHarness) {
    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
}

#[test]
fn test_checkbox_toggle_is_saved_and_reported() {
    let mut harness = SettingsTestHarness::at("/email").unwrap();
    focus_fields(&mut harness);

    harness
        .send_key(KeyCode::Char(' '), KeyModifiers::NONE)
        .unwrap();

    let saved = harness.saved_values().unwrap();
    assert_eq!(saved.get("keyEmailTls"), Some(&json!(false)));

    harness.render().unwrap();
    harness.assert_screen_contains("[ ] Use TLS for email");
    harness.assert_screen_contains("Settings updated");
}

#[test]
fn test_multi_toggle_saves_full_set() {
    let mut harness = SettingsTestHarness::at("/access").unwrap();
    focus_fields(&mut harness);

    // Third field: allowed request methods, GET checked by default
    harness.send_key_repeat(KeyCode::Down, 2).unwrap();
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    harness
        .send_key(KeyCode::Char(' '), KeyModifiers::NONE)
        .unwrap();

    let saved = harness.saved_values().unwrap();
    let methods: BTreeSet<&str> = saved["keyCorsWhitelistMethods"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(methods, BTreeSet::from(["GET", "POST"]));

    harness.render().unwrap();
    harness.assert_screen_contains("[x] GET  [x] POST  [ ] PUT  [ ] DELETE");
}

#[test]
fn test_multi_toggle_items_come_from_option_set() {
    let mut harness = SettingsTestHarness::at("/analytics").unwrap();
    harness.render().unwrap();
    harness.assert_screen_contains("Period types generated by analytics");
    harness.assert_screen_not_contains("[x] Monthly");

    harness.load_option_sets().unwrap();
    harness.render().unwrap();
    harness.assert_screen_contains("[x] Monthly  [ ] Quarterly");

    focus_fields(&mut harness);
    harness.send_key_repeat(KeyCode::Down, 4).unwrap();
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    harness
        .send_key(KeyCode::Char(' '), KeyModifiers::NONE)
        .unwrap();

    let saved = harness.saved_values().unwrap();
    let periods: BTreeSet<&str> = saved["keyAnalyticsPeriodTypes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(periods, BTreeSet::from(["Monthly", "Quarterly"]));
}

#[test]
fn test_dropdown_cycles_and_saves() {
    let mut harness = SettingsTestHarness::at("/email").unwrap();
    focus_fields(&mut harness);
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();

    // 587 is the last option; Right wraps to the first
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();

    assert_eq!(
        harness.saved_values().unwrap().get("keyEmailPort"),
        Some(&json!("25"))
    );
    harness.render().unwrap();
    harness.assert_screen_contains("[25 ▼]");
}

#[test]
fn test_dropdown_list_opens_and_confirms() {
    let mut harness = SettingsTestHarness::at("/calendar").unwrap();
    focus_fields(&mut harness);
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();

    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    harness.render().unwrap();
    harness.assert_screen_contains("> yyyy-MM-dd");
    harness.assert_screen_contains("dd-MM-yyyy");

    // While open, Down moves inside the list instead of between fields
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(
        harness.saved_values().unwrap().get("keyDateFormat"),
        Some(&json!("dd-MM-yyyy"))
    );
    assert_eq!(harness.shell_mut().panel().selected_name(), Some("keyDateFormat"));
}

#[test]
fn test_edited_value_survives_category_switch() {
    let mut harness = SettingsTestHarness::at("/email").unwrap();
    focus_fields(&mut harness);
    harness
        .send_key(KeyCode::Char(' '), KeyModifiers::NONE)
        .unwrap();

    harness.shell_mut().select_category("general");
    harness.shell_mut().select_category("email");

    assert_eq!(
        harness
            .shell_mut()
            .panel()
            .field("keyEmailTls")
            .map(|f| f.value()),
        Some(json!(false))
    );
}

#[test]
fn test_option_sets_picked_up_after_refresh() {
    let mut harness = SettingsTestHarness::at("/appearance").unwrap();
    harness.render().unwrap();
    harness.assert_screen_contains("[en ▼]");

    let before = harness.shell().state().revision;
    harness.load_option_sets().unwrap();
    assert!(harness.shell().state().revision > before);

    harness.render().unwrap();
    harness.assert_screen_contains("[English ▼]");
}

#[test]
fn test_override_notes_on_user_overridable_settings() {
    let mut harness = SettingsTestHarness::with_options(HarnessOptions {
        location: "/appearance".to_string(),
        document: SettingsDocument {
            system: HashMap::new(),
            user: HashMap::from([("keyStyle".to_string(), json!("green/green.css"))]),
        },
        ..HarnessOptions::default()
    })
    .unwrap();
    harness.render().unwrap();

    harness.assert_screen_contains("This setting can be overridden by user settings");
    harness.assert_screen_contains("Currently overridden by a user setting");
}

#[test]
fn test_stored_values_are_displayed() {
    let mut harness = SettingsTestHarness::with_options(HarnessOptions {
        location: "/email".to_string(),
        document: SettingsDocument {
            system: HashMap::from([
                ("keyEmailTls".to_string(), json!(false)),
                ("keyEmailPort".to_string(), json!("465")),
            ]),
            user: HashMap::new(),
        },
        ..HarnessOptions::default()
    })
    .unwrap();
    harness.render().unwrap();

    harness.assert_screen_contains("[ ] Use TLS for email");
    harness.assert_screen_contains("[465 ▼]");
}

struct ReadOnlyApi;

impl SettingsApi for ReadOnlyApi {
    fn load(&self) -> Result<SettingsDocument, PersistError> {
        Ok(SettingsDocument::default())
    }

    fn save(&mut self, _name: &str, _value: &Value) -> Result<(), PersistError> {
        Err(PersistError::Rejected("read only".to_string()))
    }
}

#[test]
fn test_failed_save_is_reported_without_rollback() {
    let api: SharedSettingsApi = Rc::new(RefCell::new(ReadOnlyApi));
    let mut harness = SettingsTestHarness::with_options(HarnessOptions {
        location: "/email".to_string(),
        api: Some(api),
        ..HarnessOptions::default()
    })
    .unwrap();
    focus_fields(&mut harness);
    harness
        .send_key(KeyCode::Char(' '), KeyModifiers::NONE)
        .unwrap();
    harness.render().unwrap();

    harness.assert_screen_contains("Failed to save settings: Rejected: read only");
    harness.assert_screen_contains("[ ] Use TLS for email");
}

#[test]
fn test_invalid_value_is_rejected() {
    let mut harness = SettingsTestHarness::at("/email").unwrap();
    harness.publish(Action::SaveSetting {
        name: "keyEmailTls".to_string(),
        value: json!("yes"),
    });

    assert!(harness.saved_values().unwrap().get("keyEmailTls").is_none());
    harness.render().unwrap();
    harness.assert_screen_contains("Invalid value for setting: Use TLS for email");
}
