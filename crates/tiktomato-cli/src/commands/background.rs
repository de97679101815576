use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;
use tiktomato_core::background::{encode_data_url, DEFAULT_IMAGES};
use tiktomato_core::settings::KEY_BACKGROUND;
use tiktomato_core::{load_settings, save_settings, Config, SettingsStore, ValidationError};

use super::{open_store, print_json};

#[derive(Subcommand)]
pub enum BackgroundAction {
    /// List the built-in backgrounds
    List,
    /// Select a built-in background by index
    Select {
        index: usize,
    },
    /// Use an image file as the background
    Upload {
        path: PathBuf,
        /// Media type of the file (sniffed from its contents when omitted)
        #[arg(long)]
        mime: Option<String>,
    },
}

#[derive(Serialize)]
struct BackgroundEntry<'a> {
    index: usize,
    url: &'a str,
    selected: bool,
}

pub fn run(action: BackgroundAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let mut settings = load_settings(&store);
    match action {
        BackgroundAction::List => {
            let current = settings.background_or_default();
            let entries: Vec<_> = DEFAULT_IMAGES
                .iter()
                .enumerate()
                .map(|(index, &url)| BackgroundEntry {
                    index,
                    url,
                    selected: url == current,
                })
                .collect();
            print_json(&entries)?;
        }
        BackgroundAction::Select { index } => {
            let url = DEFAULT_IMAGES.get(index).ok_or(ValidationError::OutOfBounds {
                collection: "default images".into(),
                index,
                len: DEFAULT_IMAGES.len(),
            })?;
            settings.background_image = Some(url.to_string());
            save_settings(&store, &settings);
            println!("{url}");
        }
        BackgroundAction::Upload { path, mime } => {
            let bytes = std::fs::read(&path)?;
            let reference = encode_data_url(&bytes, mime.as_deref())?;
            store.set(KEY_BACKGROUND, &reference)?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "background uploaded");
            println!("ok ({} bytes)", bytes.len());
        }
    }
    Ok(())
}
