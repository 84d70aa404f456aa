#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Drawing Buddy experience.

mod config;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use drawing_buddy_rendering::{CardLayout, Color, Presentation, RenderingBackend, Scene};
use drawing_buddy_rendering_macroquad::{MacroquadBackend, PngPrinter};
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::{config::Settings, session::Session};

/// Command-line arguments accepted by the Drawing Buddy binary.
#[derive(Debug, Parser)]
#[command(name = "drawing-buddy", about = "A guided drawing adventure for young artists")]
struct CliArgs {
    /// Path of the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for the particle background.
    #[arg(long)]
    seed: Option<u64>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL")]
    vsync: Option<bool>,
    /// Directory receiving print captures.
    #[arg(long, value_name = "DIR")]
    print_dir: Option<PathBuf>,
}

impl CliArgs {
    fn apply_overrides(self, settings: &mut Settings) {
        if let Some(seed) = self.seed {
            settings.particles.seed = seed;
        }
        if let Some(vsync) = self.vsync {
            settings.vsync = vsync;
        }
        if let Some(print_dir) = self.print_dir {
            settings.print_dir = print_dir;
        }
    }
}

/// Entry point for the Drawing Buddy command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let mut settings =
        config::load(args.config.as_deref()).context("failed to load configuration")?;
    args.apply_overrides(&mut settings);

    let printer = PngPrinter::new(settings.print_dir.clone());
    info!(
        seed = settings.particles.seed,
        vsync = settings.vsync,
        print_dir = %printer.directory().display(),
        "starting drawing buddy"
    );

    let mut session = Session::new(settings.particle_config());
    let card = CardLayout::new(
        CardLayout::DEFAULT_MAX_WIDTH,
        24.0,
        Color::from_rgb_u8(168, 85, 247),
        Color::from_rgb_u8(255, 255, 255),
    )?;
    let presentation = Presentation::new(
        settings.window_title.clone(),
        Color::from_rgb_u8(250, 232, 255),
        Scene::new(session.view(), card),
    );

    MacroquadBackend::new()
        .with_vsync(settings.vsync)
        .with_window_size(settings.window_width, settings.window_height)
        .with_printer(printer)
        .run(presentation, move |dt, input, scene| {
            session.frame(dt, input, scene)
        })
        .context("rendering backend failed")
}
