mod codec;
mod render;
mod tui;
mod zones;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use region_editor::EditorConfig;
use tracing_subscriber::prelude::*;

use crate::tui::app::EditOptions;

const DEFAULT_FILTER: &str = "warn,region_editor=info,region_editor_tui=info";

#[derive(Debug, Parser)]
#[command(version, about = "Privacy mask and motion grid editor")]
pub struct Args {
    /// Editor settings as JSON. Missing keys use the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Write logs to this file. Without it `edit` stays silent so the
    /// terminal UI is not disturbed.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Edit a zone file in the terminal with the mouse.
    Edit {
        #[arg(long)]
        zones: PathBuf,
        /// Start on the motion grid.
        #[arg(long, action, default_value = "false")]
        motion: bool,
        /// Number of mask slots the device offers.
        #[arg(long, default_value = "4")]
        slots: usize,
        /// Motion grid columns, used when the file has no grid yet.
        #[arg(long, default_value = "22")]
        columns: usize,
        /// Motion grid rows, used when the file has no grid yet.
        #[arg(long, default_value = "18")]
        rows: usize,
    },
    /// Draw the zones of a file over an image (.jpeg/.png).
    Render {
        #[arg(long)]
        zones: PathBuf,
        #[arg(long)]
        image: PathBuf,
        /// Defaults to `<image>.zones.png`.
        #[arg(long)]
        output: Option<PathBuf>,
        /// TrueType/OpenType font for labels.
        #[arg(long)]
        font: Option<PathBuf>,
        /// Draw the motion grid instead of the masks.
        #[arg(long, action, default_value = "false")]
        motion: bool,
    },
    /// Convert motion maps between hex and 0/1 rows.
    Motion {
        #[command(subcommand)]
        action: MotionAction,
    },
}

#[derive(Debug, Subcommand)]
enum MotionAction {
    /// Print a hex map as rows of 0 and 1.
    Decode {
        #[arg(long)]
        columns: usize,
        #[arg(long)]
        rows: usize,
        hex: String,
    },
    /// Encode rows of 0 and 1, separated by `/`, into a hex map.
    Encode {
        #[arg(long)]
        columns: usize,
        grid: String,
    },
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_FILTER.into())
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None if interactive => {
            // Any output would corrupt the terminal UI.
            tracing_subscriber::registry()
                .with(tracing_subscriber::EnvFilter::new("off"))
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
                .init();
            log::set_max_level(log::LevelFilter::Off);
        }
        None => {
            tracing_subscriber::registry()
                .with(filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(
        args.log_file.as_deref(),
        matches!(args.command, Command::Edit { .. }),
    )?;

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    log::debug!("{config:?}");

    match args.command {
        Command::Edit {
            zones,
            motion,
            slots,
            columns,
            rows,
        } => {
            log::info!("Editing {zones:?}");
            tui::edit_with_tui(
                config,
                EditOptions {
                    zones_path: zones,
                    motion,
                    slots,
                    columns,
                    rows,
                },
            )?;
        }
        Command::Render {
            zones,
            image,
            output,
            font,
            motion,
        } => {
            let zone_file = zones::load_zones(&zones, &config)?;
            let saved = render::render_zones(
                &image,
                &zone_file,
                &config,
                motion,
                output.as_deref(),
                font.as_deref(),
            )?;
            println!("{}", saved.display());
        }
        Command::Motion { action } => match action {
            MotionAction::Decode { columns, rows, hex } => {
                for line in codec::decode_rows(&hex, columns, rows)? {
                    println!("{line}");
                }
            }
            MotionAction::Encode { columns, grid } => {
                println!("{}", codec::encode_rows(&grid, columns)?);
            }
        },
    }

    Ok(())
}
