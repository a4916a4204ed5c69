//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s and feeds them to
//! the application's `InputState`.

mod platform;
mod state;
mod types;

pub(crate) use platform::{translate_device_event, translate_window_event};
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton};
