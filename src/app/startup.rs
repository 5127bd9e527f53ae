//! Host startup
//!
//! Parses arguments, loads configuration, installs logging, brings the
//! modules up, performs the requested action and tears everything down.

use crate::app::cli::args::{Action, Args};
use crate::app::cli::config::{ConfigError, HostConfig, Settings, StorageLocation};
use crate::app::context::AppContext;
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::{init_logging, LogFormat};
use crate::host::api::DisconnectedHost;
use crate::module::api::{
    builtin_modules, JsonFileStorage, MemoryStorage, Module, ModuleState, StorageBackend,
};
use clap::Parser;
use colored::Colorize;
use std::fmt;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

/// Errors that end the process
#[derive(Debug)]
pub enum StartupError {
    /// Something the user can fix: flags, configuration, unknown ids
    Usage { message: String },

    /// Failure outside the user's control
    System { message: String },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Usage { message } | StartupError::System { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for StartupError {}

impl ContextualError for StartupError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, StartupError::Usage { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            StartupError::Usage { message } => Some(message),
            StartupError::System { .. } => None,
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Read { .. } => StartupError::System {
                message: error.to_string(),
            },
            _ => StartupError::Usage {
                message: error.to_string(),
            },
        }
    }
}

/// Entry point used by the binary
pub async fn startup() -> ExitCode {
    let args = Args::parse();

    let settings = match HostConfig::load(args.config_file.as_deref())
        .await
        .map_err(StartupError::from)
        .and_then(|config| Settings::resolve(config, &args).map_err(StartupError::from))
    {
        Ok(settings) => settings,
        Err(e) => {
            // Report with whatever logging the flags alone describe
            let format = args
                .log_format
                .as_deref()
                .and_then(LogFormat::from_name)
                .unwrap_or_default();
            let color = use_color(args.color_override());
            if init_logging(args.log_level.as_deref(), format, None, color).is_err() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            log_error_with_context(&e, "Loading configuration");
            return ExitCode::FAILURE;
        }
    };

    let log_file = settings
        .log_file
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());
    if let Err(e) = init_logging(
        settings.log_level.as_deref(),
        settings.log_format,
        log_file.as_deref(),
        use_color(settings.color),
    ) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    log::info!(
        "litcode-host {} (api {}, built {} from {})",
        env!("CARGO_PKG_VERSION"),
        crate::get_host_api_version(),
        crate::BUILD_TIME,
        crate::GIT_HASH
    );

    let context = build_context(&settings);
    context.init(enabled_modules(&settings)).await;

    let result = match &args.action {
        None => run_until_interrupted().await,
        Some(action) => run_action(&context, action),
    };

    context.teardown().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error_with_context(&e, "Running host");
            ExitCode::FAILURE
        }
    }
}

fn use_color(setting: Option<bool>) -> bool {
    setting.unwrap_or_else(|| std::io::stderr().is_terminal())
}

/// Context with the storage backend the settings ask for
pub fn build_context(settings: &Settings) -> AppContext {
    let storage: Arc<dyn StorageBackend> = match &settings.storage {
        StorageLocation::Memory => Arc::new(MemoryStorage::new()),
        StorageLocation::File(path) => Arc::new(JsonFileStorage::open(path)),
    };
    AppContext::new(Arc::new(DisconnectedHost), storage, &settings.namespace)
}

/// Builtin modules minus the disabled ones
pub fn enabled_modules(settings: &Settings) -> Vec<Arc<dyn Module>> {
    let modules = builtin_modules();
    for id in &settings.disabled_modules {
        if !modules.iter().any(|m| &m.module_info().id == id) {
            log::warn!("Cannot disable unknown module '{}'", id);
        }
    }
    modules
        .into_iter()
        .filter(|module| {
            let id = module.module_info().id;
            let disabled = settings.is_disabled(&id);
            if disabled {
                log::info!("Module '{}' disabled by configuration", id);
            }
            !disabled
        })
        .collect()
}

async fn run_until_interrupted() -> Result<(), StartupError> {
    log::info!("Host running, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| StartupError::System {
            message: format!("Failed to listen for interrupt: {}", e),
        })
}

/// Perform a one-shot action against an initialised context
pub fn run_action(context: &AppContext, action: &Action) -> Result<(), StartupError> {
    match action {
        Action::Modules => {
            print!("{}", render_modules(context));
            Ok(())
        }
        Action::Contributions => {
            print!("{}", render_contributions(context));
            Ok(())
        }
        Action::Exec { ids } => {
            let unknown: Vec<&str> = ids
                .iter()
                .map(String::as_str)
                .filter(|id| !context.registry().execute_command(id))
                .collect();
            if unknown.is_empty() {
                Ok(())
            } else {
                Err(StartupError::Usage {
                    message: format!("Unknown command(s): {}", unknown.join(", ")),
                })
            }
        }
        Action::Key { chord } => match context.registry().get_command_for_keybinding(chord) {
            Some(command_id) => {
                log::info!("{} -> {}", chord, command_id);
                context.registry().execute_command(&command_id);
                Ok(())
            }
            None => Err(StartupError::Usage {
                message: format!("No command bound to '{}'", chord),
            }),
        },
    }
}

pub fn render_modules(context: &AppContext) -> String {
    let mut out = String::new();
    for (info, state) in context.loader().module_states() {
        let padded = format!("{:<10}", state.to_string());
        let state_label = match state {
            ModuleState::Active => padded.as_str().green(),
            ModuleState::Registered => padded.as_str().yellow(),
        };
        out.push_str(&format!(
            "{:<16} {:<8} {} {}\n",
            info.id, info.version, state_label, info.name
        ));
    }
    out
}

pub fn render_contributions(context: &AppContext) -> String {
    let registry = context.registry();
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Sidebars".bold()));
    for sidebar in registry.get_sidebars() {
        out.push_str(&format!(
            "  {:<4} {:<16} {}\n",
            sidebar.order.unwrap_or(0),
            sidebar.id,
            sidebar.title
        ));
    }

    out.push_str(&format!("{}\n", "Panels".bold()));
    for panel in registry.get_panels() {
        out.push_str(&format!("  {:<16} {:?} {}\n", panel.id, panel.position, panel.title));
    }

    out.push_str(&format!("{}\n", "Status bar".bold()));
    for item in registry.get_status_bar_items() {
        out.push_str(&format!(
            "  {:<4} {:<16} {:?} {}\n",
            item.order.unwrap_or(0),
            item.id,
            item.position,
            item.content.key()
        ));
    }

    out.push_str(&format!("{}\n", "Commands".bold()));
    for command in registry.get_commands() {
        out.push_str(&format!(
            "  {:<28} {:<14} {}\n",
            command.id,
            command.keybinding.as_deref().unwrap_or(""),
            command.title
        ));
    }

    out.push_str(&format!("{}\n", "Keybindings".bold()));
    for (chord, command_id) in registry.get_keybindings() {
        out.push_str(&format!("  {:<14} {}\n", chord, command_id));
    }

    out.push_str(&format!("{}\n", "Languages".bold()));
    for language in registry.get_languages() {
        out.push_str(&format!(
            "  {:<12} {:<12} {}\n",
            language.id,
            language.name,
            language.extensions.join(" ")
        ));
    }
    out
}
