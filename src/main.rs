use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use settings_admin::app::{AppShell, ShellServices};
use settings_admin::config::AppConfig;
use settings_admin::config_io::{self, DirectoryContext};
use settings_admin::i18n::{self, LocaleTranslator};
use settings_admin::model::action::ActionBus;
use settings_admin::model::category::CategoryRegistry;
use settings_admin::model::history::{Location, MemoryHistory};
use settings_admin::model::option_store::ConfigOptionStore;
use settings_admin::services::persistence::{
    JsonSettingsStore, SettingsApi, SettingsSaver, SharedSettingsApi,
};
use settings_admin::services::search::SearchService;
use settings_admin::services::time_source::RealTimeSource;
use settings_admin::services::{log_dirs, tracing_setup};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

/// Option sets compiled into the binary
const BUILTIN_OPTION_SETS: &str = include_str!("../assets/option_sets.json");

#[derive(Parser, Debug)]
#[command(name = "settings-admin")]
#[command(about = "Terminal system settings administration", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Location to open, e.g. /email or /search?smtp
    #[arg(long, value_name = "LOCATION")]
    location: Option<String>,

    /// Override the locale (e.g., 'en', 'fr')
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Settings document to read and write
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Option sets used to fill dropdowns
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Path to log file (default: state directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the directories used and exit
    #[arg(long)]
    paths: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(locale) = &self.locale {
            config.locale = locale.clone();
        }
        if let Some(location) = &self.location {
            config.start_location = location.clone();
        }
        if let Some(settings) = &self.settings {
            config.settings_file = Some(settings.clone());
        }
        if let Some(options) = &self.options {
            config.options_file = Some(options.clone());
        }
    }
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    if args.paths {
        log_dirs::print_all_paths();
        return Ok(());
    }

    let log_file = args.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    tracing_setup::init_global(&log_file).context("Failed to set up logging")?;
    log_dirs::cleanup_stale_logs();
    tracing::info!("Settings admin starting");

    let dir_context = DirectoryContext::from_system().context("Failed to resolve directories")?;
    let mut config = config_io::load_config(&dir_context, args.config.as_deref())
        .context("Failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;

    let settings_path = config_io::resolve_settings_path(&dir_context, &config);
    let store = JsonSettingsStore::open(&settings_path)
        .with_context(|| format!("Failed to open settings {}", settings_path.display()))?;
    let document = store.load().context("Failed to load settings")?;
    let api: SharedSettingsApi = Rc::new(RefCell::new(store));

    let registry = Rc::new(
        CategoryRegistry::builtin(&document.system).context("Failed to load categories")?,
    );
    let translator = LocaleTranslator::shared(config.locale.clone());
    tracing::info!(
        "Locale {} (available: {})",
        config.locale,
        i18n::available_locales().join(", ")
    );

    let bus = ActionBus::new();
    let options = ConfigOptionStore::new();
    let history = Rc::new(MemoryHistory::new(Location::parse(&config.start_location)));

    let _search = SearchService::mount(&bus, Rc::clone(&registry), Rc::clone(&translator));
    let _saver = SettingsSaver::mount(&bus, Rc::clone(&registry), api, Rc::clone(&translator));

    let mut shell = AppShell::mount(ShellServices {
        bus,
        registry,
        options: options.clone(),
        history,
        translator,
        time: RealTimeSource::shared(),
        snackbar_auto_hide: Duration::from_millis(config.snackbar_auto_hide_ms),
        user_values: document.user,
        sidebar_width: config.sidebar_width,
    });

    // The option source is external to the shell; it lands after mount
    refresh_options(&options, &config).context("Failed to load option sets")?;

    let terminal = ratatui::init();
    let result = run_event_loop(&mut shell, terminal);
    ratatui::restore();

    shell.unmount();
    tracing::info!("Settings admin exiting");
    result.context("Event loop returned an error")
}

fn refresh_options(options: &ConfigOptionStore, config: &AppConfig) -> AnyhowResult<()> {
    let json = match &config.options_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read option sets {}", path.display()))?,
        None => BUILTIN_OPTION_SETS.to_string(),
    };
    options
        .refresh_from_json(&json)
        .context("Failed to parse option sets")?;
    Ok(())
}

fn run_event_loop(shell: &mut AppShell, mut terminal: DefaultTerminal) -> AnyhowResult<()> {
    const POLL_INTERVAL: Duration = Duration::from_millis(50);
    let mut needs_render = true;
    let mut last_revision = None;

    loop {
        if shell.tick() {
            needs_render = true;
        }

        let revision = shell.state().revision;
        if last_revision != Some(revision) {
            last_revision = Some(revision);
            needs_render = true;
        }

        if needs_render {
            terminal
                .draw(|frame| shell.render(frame))
                .context("Failed to draw frame")?;
            needs_render = false;
        }

        if !event::poll(POLL_INTERVAL).context("Failed to poll terminal events")? {
            continue;
        }

        match event::read().context("Failed to read terminal event")? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                shell.handle_key(key);
                needs_render = true;
            }
            CrosstermEvent::Resize(_, _) => needs_render = true,
            _ => {}
        }

        if shell.should_quit() {
            return Ok(());
        }
    }
}
