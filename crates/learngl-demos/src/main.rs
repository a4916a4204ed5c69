mod args;
mod scenes;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use learngl_engine::logging::{init_logging, LoggingConfig};
use learngl_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use args::{Args, SceneKind};
use scenes::{GettingStarted, Lighting};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let title = match args.scene {
        SceneKind::GettingStarted => "LearnOpenGL",
        SceneKind::Lighting => "LearnOpenGL - Lighting",
    };

    let config = RuntimeConfig {
        title: title.to_string(),
        initial_size: LogicalSize::new(args.width as f64, args.height as f64),
        capture_cursor: !args.no_capture,
        max_frames: args.max_frames,
        ..RuntimeConfig::default()
    };

    log::info!("starting {:?} scene, shaders from {}", args.scene, args.shaders.display());

    let shaders = args.shaders.as_path();
    match args.scene {
        SceneKind::GettingStarted => Runtime::run(config, |gl| GettingStarted::new(gl, shaders)),
        SceneKind::Lighting => Runtime::run(config, |gl| Lighting::new(gl, shaders)),
    }
}
