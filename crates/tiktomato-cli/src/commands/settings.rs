use clap::Subcommand;
use tiktomato_core::settings::KEYS;
use tiktomato_core::{load_settings, save_settings, Config, SessionConfig};

use super::{open_store, print_json};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a settings value
    Get {
        /// Settings key (workTime, shortBreak, longBreak, bgImage, countdownFont)
        key: String,
    },
    /// Set and apply a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings as JSON
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: SettingsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    match action {
        SettingsAction::Get { key } => {
            let settings = load_settings(&store);
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    return Err(format!("unknown key: {key} (expected one of {})", KEYS.join(", ")).into());
                }
            }
        }
        SettingsAction::Set { key, value } => {
            let mut settings = load_settings(&store);
            settings.set(&key, &value)?;
            save_settings(&store, &settings);
            println!("ok");
        }
        SettingsAction::List => {
            print_json(&load_settings(&store))?;
        }
        SettingsAction::Reset => {
            save_settings(&store, &SessionConfig::default());
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
