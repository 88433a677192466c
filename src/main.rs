use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iocraft::prelude::*;

use playtime_board::app::App;
use playtime_board::color::ColorDepth;
use playtime_board::config::loader;
use playtime_board::engine::{Engine, EngineHandle, HttpEngine, StubEngine};
use playtime_board::navigation::{SECTION_PARAM, SectionId, with_query_param};
use playtime_board::theme::{Background, ResolvedTheme};
use playtime_board::types::SettingsSnapshot;

#[derive(Parser)]
#[command(
    name = "playtime-board",
    version,
    about = "Screen-time settings in the terminal"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long)]
    debug: bool,

    /// Section to open (see `playtime-board sections`).
    #[arg(short, long, value_name = "ID")]
    section: Option<String>,

    /// Serve a snapshot JSON file instead of talking to the backend.
    #[arg(long, value_name = "FILE")]
    stub: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the settings sections.
    Sections,
    /// Open a settings URL, restoring its `section` parameter.
    Open {
        /// Settings page URL, e.g. http://127.0.0.1:5000/settings?section=time-limits
        url: String,
    },
}

fn load_stub(path: &Path) -> Result<SettingsSnapshot> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing snapshot JSON from {}", path.display()))
}

fn main() -> Result<()> {
    // Install a panic hook that writes to a file, since the fullscreen TUI
    // swallows stderr.
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("{info}\n\n{backtrace}");
        let _ = std::fs::write("panic.log", &msg);
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();

    // Handle subcommands that don't need the TUI.
    let open_url = match cli.command {
        Some(Commands::Sections) => {
            for section in SectionId::ALL {
                println!("{:<16} {}", section.id(), section.label());
            }
            return Ok(());
        }
        Some(Commands::Open { url }) => Some(url),
        None => None,
    };

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    // Load config.
    let config = loader::load_config(cli.config.as_deref())?;

    // `--section` wins over the section of an opened URL.
    let initial_location = match (open_url, cli.section.as_deref()) {
        (Some(url), Some(section)) => Some(with_query_param(&url, SECTION_PARAM, section)),
        (None, Some(section)) => Some(with_query_param(
            &config.defaults.settings_path,
            SECTION_PARAM,
            section,
        )),
        (url, None) => url,
    };

    // Detect terminal capabilities.
    let color_depth = ColorDepth::detect();
    let background = Background::detect();
    let theme = ResolvedTheme::resolve(&config.theme, background);

    // Start the backend engine in a dedicated OS thread (owns its own Tokio
    // runtime). Dropping `engine_handle` at the end of `main` closes the
    // sender channel, signalling the engine to shut down.
    let engine_handle: EngineHandle = match cli.stub.as_deref() {
        Some(path) => StubEngine {
            snapshot: load_stub(path)?,
        }
        .start(),
        None => HttpEngine::new(&config.backend)
            .context("configuring the backend client")?
            .start(),
    };

    tracing::info!(
        "playtime-board starting (backend {})",
        config.backend.base_url
    );

    // Enter fullscreen TUI (iocraft uses smol internally).
    smol::block_on(
        element! {
            App(
                config: &config,
                engine: &engine_handle,
                theme: &theme,
                color_depth,
                initial_location,
            )
        }
        .fullscreen(),
    )?;

    Ok(())
}
