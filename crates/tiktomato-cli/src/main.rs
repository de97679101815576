use clap::{Parser, Subcommand};
use tiktomato_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "tiktomato-cli", version, about = "Tik Tomato Pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive timer session driven by stdin commands
    Run,
    /// Session settings (durations, background, font)
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Background image selection
    Background {
        #[command(subcommand)]
        action: commands::background::BackgroundAction,
    },
    /// Host configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = Config::load();
    let config = loaded.as_ref().ok().cloned().unwrap_or_default();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "using default host configuration");
    }

    let result = match cli.command {
        Commands::Run => commands::session::run(&config),
        Commands::Settings { action } => commands::settings::run(action, &config),
        Commands::Background { action } => commands::background::run(action, &config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
