use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spinwheel_tui::app::App;
use spinwheel_tui::config::AppConfig;

mod headless;

#[derive(Parser, Debug)]
#[command(name = "spinwheel", version, about = "A terminal spin-the-wheel prize picker")]
struct Cli {
    /// Path to config file (default: ~/.config/spinwheel/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme name (overrides config)
    #[arg(short, long)]
    theme: Option<String>,

    /// Seed the random source for reproducible spins
    #[arg(short, long)]
    seed: Option<u64>,

    /// Delay between a spin and its result, in milliseconds (overrides config)
    #[arg(long)]
    resolve_delay_ms: Option<u64>,

    /// Spin without the terminal UI and print each result
    #[arg(long)]
    headless: bool,

    /// Number of spins in headless mode
    #[arg(long, default_value_t = 1, requires = "headless")]
    spins: u32,

    /// Print headless results as JSON lines
    #[arg(long, requires = "headless")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config; a bad file is reported once logging is up
    let (mut config, config_error) = match AppConfig::read(cli.config.as_deref()) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Apply CLI overrides
    if let Some(theme) = cli.theme {
        config.general.theme = theme;
    }
    if let Some(delay) = cli.resolve_delay_ms {
        config.wheel.resolve_delay_ms = delay;
    }

    // Initialize logging to file
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spinwheel");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join("spinwheel.log"))?;

    let level = log_level(&config.general.log_level);
    let directive = format!("spinwheel={}", level.unwrap_or(LevelFilter::INFO));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    if let Some(e) = config_error {
        warn!("Ignoring config, using defaults: {:#}", e);
    }
    if level.is_none() {
        warn!("Unknown log level '{}', using info", config.general.log_level);
    }

    info!("Spinwheel starting");

    if cli.headless {
        let options = headless::Options {
            spins: cli.spins,
            json: cli.json,
            seed: cli.seed,
        };
        let mut stdout = std::io::stdout().lock();
        headless::run(config.wheel, options, &mut stdout).await?;
    } else {
        let mut app = App::new(config, cli.seed)?;
        app.run().await?;
    }

    info!("Spinwheel exiting");
    Ok(())
}

/// Parse `general.log_level`. Unknown names yield `None`.
fn log_level(configured: &str) -> Option<LevelFilter> {
    configured.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_names() {
        assert_eq!(log_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(log_level("WARN"), Some(LevelFilter::WARN));
        assert_eq!(log_level("off"), Some(LevelFilter::OFF));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert_eq!(log_level("verbose"), None);
        assert_eq!(log_level(""), None);
    }

    #[test]
    fn test_fallback_directive_parses() {
        let level = log_level("verbose").unwrap_or(LevelFilter::INFO);
        let directive: Result<tracing_subscriber::filter::Directive, _> =
            format!("spinwheel={}", level).parse();
        assert!(directive.is_ok());
    }
}
