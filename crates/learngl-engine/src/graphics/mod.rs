//! RAII wrappers over GL objects.
//!
//! Every wrapper owns exactly one GL handle, is not `Clone`, and deletes its
//! handle once in `Drop`. All of them issue their calls through an
//! `Rc<dyn GlApi>` obtained from [`GlContext::api`](crate::gl::GlContext::api).

mod attribute;
mod buffer;
mod error;
mod shader;
mod texture;
mod vertex_array;

pub use attribute::{AttributeType, VertexAttribute, VertexLayout};
pub use buffer::{ElementBuffer, VertexBuffer};
pub use error::{ErrorKind, GraphicsError, GraphicsResult};
pub use shader::ShaderProgram;
pub use texture::Texture2D;
pub use vertex_array::VertexArray;
