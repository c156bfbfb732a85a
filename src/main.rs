mod commands;
mod gateway;
mod i18n;
mod store;

use clap::{Parser, Subcommand};
use hubctl_channels::telegram::TelegramTransport;
use hubctl_core::config::{self, Settings, CONFIG_PATH_ENV, TOKEN_ENV};
use hubctl_sandbox::SudoExecutor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use store::ConfigStore;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "hubctl",
    version,
    about = "Start and stop host services from a Telegram chat"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Telegram bot token.
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Path to the JSON state document.
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Seconds to wait between polls.
    #[arg(long)]
    poll_interval_secs: Option<u64>,

    /// Maximum number of updates handled at once.
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// User that service scripts run as.
    #[arg(long)]
    run_as: Option<String>,

    /// Also write logs to a daily-rotated file in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (default).
    Start,
    /// Validate the state document and print what it contains.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_dir.as_deref());

    match cli.command.as_ref().unwrap_or(&Commands::Start) {
        Commands::Start => {
            let settings = settings_from(&cli)?;
            settings.validate()?;

            let store = ConfigStore::open(&settings.config_path)?;
            let transport = Arc::new(TelegramTransport::new(&settings.bot_token));
            let executor = Arc::new(SudoExecutor::new(settings.run_as.clone()));

            println!("hubctl — Starting polling...");
            let gw = Arc::new(gateway::Gateway::new(
                transport,
                executor,
                store,
                settings.poll_interval(),
                settings.max_concurrent,
            ));
            gw.run().await?;
        }
        Commands::Check => {
            let Some(path) = cli.config.as_deref() else {
                anyhow::bail!("{CONFIG_PATH_ENV} must be set");
            };
            let state = config::load(path)?;

            println!("hubctl — Config Check\n");
            println!("Config: {}", path.display());
            println!("Admin: {}", state.admin_id);
            println!("Operators:");
            for (id, op) in &state.whitelist {
                println!("  {id}: {} ({})", op.username, op.locale);
            }
            let locales: Vec<&str> = state.localization.keys().map(String::as_str).collect();
            println!("Locales: {}", locales.join(", "));
            println!("Services:");
            for (name, service) in &state.hub {
                println!("  /{name} -> {}", service.path);
            }

            let warnings = state.validate();
            if warnings.is_empty() {
                println!("\nNo problems found.");
            } else {
                println!();
                for warning in &warnings {
                    println!("  warning: {warning}");
                }
            }
        }
    }

    Ok(())
}

/// Resolve process settings; both the token and the document path are required.
fn settings_from(cli: &Cli) -> anyhow::Result<Settings> {
    let token = cli
        .token
        .clone()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("{TOKEN_ENV} must be set"))?;
    let path = cli
        .config
        .clone()
        .ok_or_else(|| anyhow::anyhow!("{CONFIG_PATH_ENV} must be set"))?;

    let mut settings = Settings::new(token, path);
    if let Some(secs) = cli.poll_interval_secs {
        settings.poll_interval_secs = secs;
    }
    if let Some(max) = cli.max_concurrent {
        settings.max_concurrent = max;
    }
    if let Some(ref user) = cli.run_as {
        settings.run_as = user.clone();
    }
    Ok(settings)
}

/// Console logging filtered by `RUST_LOG` (default `info`), plus an optional
/// rolling log file. The returned guard must live until exit.
fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "hubctl.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_require_token_and_path() {
        let cli = Cli::parse_from(["hubctl", "--config", "/etc/hubctl.json"]);
        if std::env::var(TOKEN_ENV).is_err() {
            assert!(settings_from(&cli).is_err());
        }

        let cli = Cli::parse_from([
            "hubctl",
            "--token",
            "abc",
            "--config",
            "/etc/hubctl.json",
            "--poll-interval-secs",
            "2",
            "--run-as",
            "svc",
        ]);
        let settings = settings_from(&cli).unwrap();
        assert_eq!(settings.bot_token, "abc");
        assert_eq!(settings.poll_interval_secs, 2);
        assert_eq!(settings.run_as, "svc");
        assert_eq!(settings.max_concurrent, 32);
    }

    #[test]
    fn test_check_subcommand_parses() {
        let cli = Cli::parse_from(["hubctl", "--config", "x.json", "check"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
    }
}
