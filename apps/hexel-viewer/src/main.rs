//! Hexel Viewer
//!
//! Runs a scripted, headless session over a row of hexagonal voxels: the
//! camera walks forward, strafes, pans, zooms, survives a resize and a focus
//! loss, then quits on Escape. Every frame goes through the same
//! input → camera → render path a windowed host would use.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p hexel-viewer -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--frames <N>`: Frames to run (default: 240)
//! - `--dt <SECONDS>`: Fixed frame time (default: 1/60)
//! - `--width <W>`, `--height <H>`: Viewport size (default: 1280x720)
//! - `--faces <MASK>`: Visible faces, decimal or `0x` hex byte (default: 0xFF)
//! - `--voxels <N>`: Voxels in the row (default: 1)
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod app;
mod config;

use std::time::Instant;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::Viewer;
use crate::config::ViewerConfig;

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ViewerConfig::from_args()?;
    info!(
        title = %config.title,
        width = config.width,
        height = config.height,
        frames = config.frames,
        "Starting viewer"
    );

    let dt = config.dt;
    let mut viewer = Viewer::new(config).context("failed to build the scene")?;

    let start = Instant::now();
    while viewer.frame() < viewer.config().frames && !viewer.should_exit() {
        viewer.script_input();
        viewer.update(dt);
        viewer
            .render()
            .with_context(|| format!("render failed at frame {}", viewer.frame()))?;
    }
    let elapsed = start.elapsed();

    let camera = viewer.camera();
    info!(
        frames = viewer.frame(),
        draw_calls = viewer.draw_calls(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        live_buffers = viewer.live_buffers(),
        "Session finished"
    );
    info!(
        position = ?camera.position,
        yaw = camera.yaw(),
        pitch = camera.pitch(),
        fov = camera.fov(),
        "Final camera"
    );

    Ok(())
}

fn print_help() {
    eprintln!(
        "Hexel Viewer

Runs a scripted headless session over hexagonal voxels.

USAGE:
    hexel-viewer [OPTIONS]

OPTIONS:
    --frames <N>         Frames to run (default: 240)
    --dt <SECONDS>       Fixed frame time in seconds (default: 0.016667)
    --width <W>          Viewport width (default: 1280)
    --height <H>         Viewport height (default: 720)
    --faces <MASK>       Visible faces as a byte, decimal or 0x hex (default: 0xFF)
                         bit 0 top, bit 1 bottom, bits 2-7 sides 0-5
    --voxels <N>         Voxels in the row along +X (default: 1)
    -h, --help           Print this help message

ENVIRONMENT:
    RUST_LOG             Log level (e.g., info, debug, trace)"
    );
}
