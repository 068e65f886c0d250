use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal;
use todo_core::config::{ConfigOverrides, canonicalize_name};
use todo_core::error::AppError;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "TODOAPP_LOG";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Filter to view the list through (all, active, completed)
    #[arg(long, global = true, value_name = "FILTER")]
    pub filter: Option<String>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: todo add "Buy milk"
    Add { title: Option<String> },
    /// Toggle a task between active and completed
    ///
    /// Example: todo toggle 1
    Toggle { id: String },
    /// Mark every task completed, or active again with --clear
    ///
    /// Example: todo toggle-all
    /// Example: todo toggle-all --clear
    ToggleAll {
        #[arg(long)]
        clear: bool,
    },
    /// Edit a task's title; an empty title deletes the task
    ///
    /// Example: todo edit 1 "Buy organic milk"
    Edit { id: String, new_title: String },
    /// Delete a task
    ///
    /// Example: todo delete 1
    Delete { id: String },
    /// Delete every completed task
    ///
    /// Example: todo clear-completed
    ClearCompleted,
    /// Show the list through a filter
    ///
    /// Example: todo list
    /// Example: todo list active
    List { filter: Option<String> },
    /// Show details of a task
    ///
    /// Example: todo show 1
    Show { id: String },
}

/// Flag name used to identify config override arguments by the runtime.
pub const CONFIG_OVERRIDE_FLAG: &str = "--config-override";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    Namespace,
    DefaultFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let field = canonicalize_name(key_raw);
    if field.is_empty() {
        return Err("override key cannot be empty".to_string());
    }

    let target = match field.as_str() {
        "theme" => ConfigOverrideTarget::Theme,
        "namespace" => ConfigOverrideTarget::Namespace,
        "default_filter" | "filter" => ConfigOverrideTarget::DefaultFilter,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)
            .map_err(|message| AppError::invalid_input(format!("{CONFIG_OVERRIDE_FLAG}: {message}")))?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::Namespace => overrides.namespace = Some(parsed.value),
            ConfigOverrideTarget::DefaultFilter => overrides.default_filter = Some(parsed.value),
        }
    }
    Ok(overrides)
}

/// Installs the stderr log subscriber. `TODOAPP_LOG` wins over `verbose`.
pub fn init_tracing(verbose: u8) -> Result<(), AppError> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| AppError::invalid_input(format!("invalid log filter: {err}")))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        tracing::debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
