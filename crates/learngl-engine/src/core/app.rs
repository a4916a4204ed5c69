use anyhow::Result;

use crate::input::InputState;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// The runtime feeds every translated input event into [`input`](App::input)
/// before the frame that observes it.
pub trait App {
    /// Input sink owned by the application.
    fn input(&mut self) -> &mut InputState;

    /// Called once per redraw, before the buffer swap.
    ///
    /// An error stops the runtime and is returned from `Runtime::run`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl>;
}
