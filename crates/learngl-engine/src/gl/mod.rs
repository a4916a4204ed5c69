//! OpenGL context + backend seam.
//!
//! This module is responsible for:
//! - creating the window, glutin display/surface and a current GL core context
//! - loading GL entry points through `glow`
//! - exposing the narrow [`GlApi`] surface the graphics wrappers are written against

mod api;
mod context;
mod glow_backend;
mod handles;

#[cfg(test)]
pub(crate) mod testing;

pub use api::GlApi;
pub use context::{GlContext, GlInit};
pub use glow_backend::GlowBackend;
pub use handles::{
    BufferId, BufferTarget, ClearMask, Primitive, ProgramId, ShaderId, ShaderStage, TextureId,
    UniformLocation, VertexArrayId,
};
