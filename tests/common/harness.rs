//! Test harness driving the settings shell through keystrokes and a
//! `TestBackend` terminal.

use super::tracing::init_tracing_from_env;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::Value;
use settings_admin::app::{AppShell, ShellServices};
use settings_admin::i18n::LocaleTranslator;
use settings_admin::model::action::{Action, ActionBus};
use settings_admin::model::category::CategoryRegistry;
use settings_admin::model::history::{Location, MemoryHistory};
use settings_admin::model::option_store::ConfigOptionStore;
use settings_admin::services::persistence::{
    JsonSettingsStore, SettingsApi, SettingsDocument, SettingsSaver, SharedSettingsApi,
};
use settings_admin::services::search::SearchService;
use settings_admin::services::time_source::TestTimeSource;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

/// Option sets compiled into the binary
pub const BUILTIN_OPTION_SETS: &str = include_str!("../../assets/option_sets.json");

/// How to set up a harness
pub struct HarnessOptions {
    pub width: u16,
    pub height: u16,
    pub location: String,
    pub locale: String,
    /// Written to the settings file before the shell starts
    pub document: SettingsDocument,
    /// Replaces the file-backed settings store
    pub api: Option<SharedSettingsApi>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 30,
            location: "/".to_string(),
            locale: "en".to_string(),
            document: SettingsDocument::default(),
            api: None,
        }
    }
}

pub struct SettingsTestHarness {
    shell: AppShell,
    terminal: Terminal<TestBackend>,
    bus: ActionBus,
    history: MemoryHistory,
    options: ConfigOptionStore,
    time: Rc<TestTimeSource>,
    settings_path: PathBuf,
    _search: SearchService,
    _saver: SettingsSaver,
    _temp_dir: TempDir,
}

impl SettingsTestHarness {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::with_options(HarnessOptions {
            width,
            height,
            ..HarnessOptions::default()
        })
    }

    /// Start at `location` instead of `/`
    pub fn at(location: &str) -> Result<Self> {
        Self::with_options(HarnessOptions {
            location: location.to_string(),
            ..HarnessOptions::default()
        })
    }

    pub fn with_options(options: HarnessOptions) -> Result<Self> {
        init_tracing_from_env();

        let temp_dir = TempDir::new()?;
        let settings_path = temp_dir.path().join("settings.json");
        std::fs::write(
            &settings_path,
            serde_json::to_string_pretty(&options.document)?,
        )?;

        let api: SharedSettingsApi = match options.api {
            Some(api) => api,
            None => Rc::new(RefCell::new(JsonSettingsStore::open(&settings_path)?)),
        };
        let document = api.borrow().load()?;

        let registry = Rc::new(CategoryRegistry::builtin(&document.system)?);
        let translator = LocaleTranslator::shared(options.locale);
        let bus = ActionBus::new();
        let option_store = ConfigOptionStore::new();
        let history = MemoryHistory::new(Location::parse(&options.location));
        let time = TestTimeSource::shared();

        let search = SearchService::mount(&bus, Rc::clone(&registry), Rc::clone(&translator));
        let saver = SettingsSaver::mount(&bus, Rc::clone(&registry), api, Rc::clone(&translator));

        let shell = AppShell::mount(ShellServices {
            bus: bus.clone(),
            registry,
            options: option_store.clone(),
            history: Rc::new(history.clone()),
            translator,
            time: time.clone(),
            snackbar_auto_hide: Duration::from_millis(1250),
            user_values: document.user,
            sidebar_width: 28,
        });

        let terminal = Terminal::new(TestBackend::new(options.width, options.height))?;

        Ok(Self {
            shell,
            terminal,
            bus,
            history,
            options: option_store,
            time,
            settings_path,
            _search: search,
            _saver: saver,
            _temp_dir: temp_dir,
        })
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        self.shell.handle_key(KeyEvent::new(code, modifiers));
        Ok(())
    }

    /// Send `code` `times` times without modifiers
    pub fn send_key_repeat(&mut self, code: KeyCode, times: usize) -> Result<()> {
        for _ in 0..times {
            self.send_key(code, KeyModifiers::NONE)?;
        }
        Ok(())
    }

    pub fn type_text(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            self.send_key(KeyCode::Char(c), KeyModifiers::NONE)?;
        }
        Ok(())
    }

    pub fn render(&mut self) -> Result<()> {
        let shell = &mut self.shell;
        self.terminal.draw(|frame| shell.render(frame))?;
        Ok(())
    }

    /// Advance the logical clock and run one tick
    pub fn advance_time(&mut self, duration: Duration) -> bool {
        self.time.advance(duration);
        self.shell.tick()
    }

    /// Refresh the option store from the built-in option sets
    pub fn load_option_sets(&self) -> Result<()> {
        self.options.refresh_from_json(BUILTIN_OPTION_SETS)?;
        Ok(())
    }

    pub fn publish(&self, action: Action) {
        self.bus.publish(action);
    }

    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        let mut rows = Vec::with_capacity(area.height as usize);
        for y in 0..area.height {
            let mut row = String::new();
            for x in 0..area.width {
                row.push_str(buffer[(x, y)].symbol());
            }
            rows.push(row.trim_end().to_string());
        }
        rows.join("\n")
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen not to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn shell(&self) -> &AppShell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut AppShell {
        &mut self.shell
    }

    pub fn bus(&self) -> &ActionBus {
        &self.bus
    }

    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    pub fn options(&self) -> &ConfigOptionStore {
        &self.options
    }

    /// System values currently in the settings file
    pub fn saved_values(&self) -> Result<HashMap<String, Value>> {
        let contents = std::fs::read_to_string(&self.settings_path)?;
        let document: SettingsDocument = serde_json::from_str(&contents)?;
        Ok(document.system)
    }

    pub fn should_quit(&self) -> bool {
        self.shell.should_quit()
    }
}
