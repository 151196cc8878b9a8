//! Pixart - 16x16 pixel art editor backend
//!
//! Runs the preset web server, lists presets and exports presets through
//! the editor from the command line.

#![warn(missing_docs)]

mod cli;
mod config;
mod logging_setup;

use anyhow::{bail, Context, Result};
use pixart_control::{ArtLibrary, HttpPresetClient, PresetLoader, PresetProvider, WebServer};
use pixart_core::{Editor, PresetLoadOutcome, Translations};
use pixart_io::{write_export, ExportFormat, FileStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use cli::{Cli, Command, USAGE};
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse(std::env::args().skip(1))?;
    if cli.command == Command::Help {
        print!("{}", USAGE);
        return Ok(());
    }

    let (config, source) = AppConfig::load(cli.config.as_deref())?;
    let _log_guard = logging_setup::init(&config.log)?;
    match &source {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => info!("No configuration file, using defaults"),
    }

    let result = run(cli.command, &config).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Serve => serve(config).await,
        Command::Presets { server } => match server_url(config, server) {
            Some(url) => list_presets(&HttpPresetClient::new(url)?, config).await,
            None => list_presets(&local_library(config)?, config).await,
        },
        Command::Export {
            name,
            format,
            out,
            server,
        } => {
            let out = out.unwrap_or_else(|| PathBuf::from(format.file_name()));
            match server_url(config, server) {
                Some(url) => {
                    let loader = PresetLoader::new(Arc::new(HttpPresetClient::new(url)?));
                    export(&loader, config, &name, format, out).await
                }
                None => {
                    let loader = PresetLoader::new(Arc::new(local_library(config)?));
                    export(&loader, config, &name, format, out).await
                }
            }
        }
        Command::Help => Ok(()),
    }
}

fn server_url(config: &AppConfig, flag: Option<String>) -> Option<String> {
    flag.or_else(|| config.presets_url.clone())
}

fn local_library(config: &AppConfig) -> Result<ArtLibrary> {
    config
        .server
        .load_library()
        .context("Failed to load preset library")
}

fn default_translations(config: &AppConfig) -> Translations {
    config
        .locales
        .translations_for(&config.locales.default_locale)
}

async fn serve(config: &AppConfig) -> Result<()> {
    let library = local_library(config)?;
    info!("Serving {} presets", library.len());

    let server = WebServer::with_locales(config.server.clone(), library, config.locales.clone());
    tokio::select! {
        result = server.run() => result.context("Web server failed")?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
    Ok(())
}

async fn list_presets<P: PresetProvider>(provider: &P, config: &AppConfig) -> Result<()> {
    let translations = default_translations(config);
    let names = provider
        .list_names()
        .await
        .context("Failed to fetch preset list")?;
    for name in names {
        println!("{}\t{}", name, translations.preset_label(&name));
    }
    Ok(())
}

async fn export<P: PresetProvider + 'static>(
    loader: &PresetLoader<P>,
    config: &AppConfig,
    name: &str,
    format: ExportFormat,
    out: PathBuf,
) -> Result<()> {
    let store = match &config.store_path {
        Some(path) => FileStore::open(path),
        None => FileStore::open_default()?,
    };
    let mut editor = Editor::new(store, default_translations(config));

    if loader.load(&mut editor, name).await != PresetLoadOutcome::Applied {
        bail!("{} ({})", editor.translations().error_loading, name);
    }

    let written = write_export(editor.grid(), format, &out)
        .with_context(|| format!("Failed to write {:?}", out))?;
    println!("{} ({}, {} bytes)", out.display(), format.mime_type(), written);
    Ok(())
}
