//! learngl engine crate.
//!
//! Thin RAII layer over OpenGL (buffers, vertex arrays, shader programs,
//! textures), a free-fly camera, input state, and the winit/glutin runtime
//! that drives a single-window demo.

pub mod camera;
pub mod core;
pub mod gl;
pub mod graphics;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;

pub use glam;
