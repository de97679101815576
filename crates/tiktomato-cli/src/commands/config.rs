use clap::Subcommand;
use tiktomato_core::Config;

use super::print_json;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a host config value
    Get {
        /// Config key (e.g. "tick_interval_ms", "log_filter")
        key: String,
    },
    /// Set a host config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all host config values
    List,
    /// Reset host config to defaults
    Reset,
}

pub fn run(action: ConfigAction, mut config: Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => {
                return Err(format!("unknown key: {key} (expected one of {})", Config::KEYS.join(", ")).into());
            }
        },
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            print_json(&config)?;
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
