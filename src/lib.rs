use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

pub mod ai;
pub mod commands;
pub mod platforms;
pub mod store;
pub mod utils;

use commands::clipboard::SystemClipboard;
use commands::settings::{apply_setting, describe_settings, SettingChange};
use commands::transform::{self, CommandOutcome};
use store::{resolve_settings_path, SettingsStore};

pub use ai::{transform_ai, AISettings, TransformRequest};
pub use platforms::{format, PlatformConfig};

/// Reformat notes into platform-styled social posts
#[derive(Parser)]
#[command(name = "notecast")]
#[command(version)]
#[command(about = "Reformat notes into platform-styled social posts", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to $NOTECAST_SETTINGS or the user config dir)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args)]
pub struct InputArgs {
    /// Target platform id (defaults to the configured default)
    #[arg(short, long)]
    pub platform: Option<String>,

    /// Note file to read; stdin when omitted or "-"
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List platforms
    Platforms,
    /// Rule-based preview, no network
    Preview(InputArgs),
    /// Rewrite with the AI endpoint, falling back to rules
    Generate(InputArgs),
    /// Copy the rule-based preview to the clipboard
    Copy(InputArgs),
    /// Generate (AI if enabled) and copy to the clipboard
    Distribute(InputArgs),
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print current settings (API key masked)
    Show,
    /// Print the settings file path
    Path,
    /// Enable a platform
    Enable { id: String },
    /// Disable a platform
    Disable { id: String },
    /// Set the default platform
    Default { id: String },
    /// Turn AI rewriting on or off
    Ai {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
    /// Set the API key (empty string clears it)
    Key { value: String },
    /// Set the model name
    Model { value: String },
    /// Set the completion endpoint URL
    Endpoint { value: String },
}

fn read_input(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e)),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

fn report(outcome: CommandOutcome) {
    for notice in &outcome.notices {
        eprintln!("⚠️  {}", notice);
    }
    if let Some(text) = outcome.text {
        println!("{}", text);
        if outcome.copied {
            eprintln!("✅ Copied to clipboard ({})", outcome.platform_id);
        }
    }
}

fn config_change(action: ConfigAction) -> Option<SettingChange> {
    match action {
        ConfigAction::Show | ConfigAction::Path => None,
        ConfigAction::Enable { id } => Some(SettingChange::EnablePlatform(id)),
        ConfigAction::Disable { id } => Some(SettingChange::DisablePlatform(id)),
        ConfigAction::Default { id } => Some(SettingChange::DefaultPlatform(id)),
        ConfigAction::Ai { state } => Some(SettingChange::AiEnabled(state == "on")),
        ConfigAction::Key { value } => Some(SettingChange::ApiKey(value)),
        ConfigAction::Model { value } => Some(SettingChange::Model(value)),
        ConfigAction::Endpoint { value } => Some(SettingChange::Endpoint(value)),
    }
}

/// Parse the command line and run one command.
pub async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let path = resolve_settings_path(cli.settings.as_deref()).map_err(|e| e.to_string())?;
    let mut store = SettingsStore::open(&path).map_err(|e| e.to_string())?;
    log::debug!("Using settings at {}", store.path().display());

    // Snapshot per call; later changes do not affect this run
    let settings = store.settings().clone();
    let transport = ai::default_transport();
    let clipboard = SystemClipboard;

    match cli.command {
        Commands::Platforms => {
            for platform in &settings.platforms {
                let default = if platform.id == settings.default_platform { "*" } else { " " };
                let state = if platform.enabled { "enabled" } else { "disabled" };
                println!("{} {:<12} {:<14} {}", default, platform.id, platform.name, state);
            }
        }
        Commands::Preview(args) => {
            let content = read_input(args.file.as_deref())?;
            report(transform::preview(&settings, &content, args.platform.as_deref())?);
        }
        Commands::Generate(args) => {
            let content = read_input(args.file.as_deref())?;
            report(transform::generate(transport, &settings, &content, args.platform.as_deref()).await?);
        }
        Commands::Copy(args) => {
            let content = read_input(args.file.as_deref())?;
            report(transform::copy(&clipboard, &settings, &content, args.platform.as_deref())?);
        }
        Commands::Distribute(args) => {
            let content = read_input(args.file.as_deref())?;
            report(
                transform::distribute(transport, &clipboard, &settings, &content, args.platform.as_deref())
                    .await?,
            );
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => println!("{}", describe_settings(&settings)),
            ConfigAction::Path => println!("{}", store.path().display()),
            action => {
                if let Some(change) = config_change(action) {
                    println!("{}", apply_setting(&mut store, change)?);
                }
            }
        },
    }

    Ok(())
}
