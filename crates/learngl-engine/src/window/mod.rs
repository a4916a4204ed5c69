//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and drives the single GL window: input
//! forwarding, resize, per-frame callback and buffer swap.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit::dpi::LogicalSize;
