//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which demo to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Ten textured cubes spinning in front of a sky-blue backdrop.
    GettingStarted,
    /// A Phong-lit cube next to a small light source.
    Lighting,
}

#[derive(Parser, Debug)]
#[command(
    name = "learngl",
    about = "OpenGL learning demos",
    long_about = "OpenGL learning demos.\n\n\
                  Move with W/A/S/D, rise with Space, sink with Left Ctrl, \
                  look around with the mouse, zoom with the scroll wheel. \
                  Escape closes the window."
)]
pub struct Args {
    /// Demo scene to run.
    #[arg(long, default_value = "getting-started", value_enum)]
    pub scene: SceneKind,

    /// Initial window width in logical pixels.
    #[arg(long, default_value = "800", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value = "600", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Directory holding the GLSL sources.
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/content/shaders"))]
    pub shaders: PathBuf,

    /// Exit after rendering N frames.
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Leave the cursor visible and free.
    #[arg(long)]
    pub no_capture: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["learngl"]).unwrap();
        assert_eq!(args.scene, SceneKind::GettingStarted);
        assert_eq!((args.width, args.height), (800, 600));
        assert!(args.shaders.ends_with("content/shaders"));
        assert_eq!(args.max_frames, None);
        assert!(!args.no_capture);
    }

    #[test]
    fn scene_and_limits() {
        let args = Args::try_parse_from([
            "learngl",
            "--scene",
            "lighting",
            "--max-frames",
            "3",
            "--no-capture",
        ])
        .unwrap();
        assert_eq!(args.scene, SceneKind::Lighting);
        assert_eq!(args.max_frames, Some(3));
        assert!(args.no_capture);
    }

    #[test]
    fn unknown_scene_is_rejected() {
        assert!(Args::try_parse_from(["learngl", "--scene", "shadows"]).is_err());
    }

    #[test]
    fn zero_window_size_is_rejected() {
        assert!(Args::try_parse_from(["learngl", "--width", "0"]).is_err());
        assert!(Args::try_parse_from(["learngl", "--height", "0"]).is_err());
        assert!(Args::try_parse_from(["learngl", "--width", "1", "--height", "1"]).is_ok());
    }
}
