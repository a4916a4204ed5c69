use std::fmt;
use std::rc::Rc;

use crate::gl::{GlApi, VertexArrayId};

use super::buffer::{ElementBuffer, VertexBuffer};
use super::error::{GraphicsError, GraphicsResult};

/// Owns the vertex source (and optionally the index source) for a draw call.
///
/// Attribute slots are configured when a vertex buffer is set. Changing the
/// buffer's layout afterwards does not rewire the slots; set the buffer again.
pub struct VertexArray {
    gl: Rc<dyn GlApi>,
    id: Option<VertexArrayId>,
    vertex_buffer: Option<VertexBuffer>,
    element_buffer: Option<ElementBuffer>,
}

impl VertexArray {
    pub fn new(gl: Rc<dyn GlApi>) -> GraphicsResult<Self> {
        let id = gl
            .create_vertex_array()
            .map_err(|e| GraphicsError::allocation("vertex array", e))?;
        log::trace!("created vertex array {id:?}");

        Ok(Self {
            gl,
            id: Some(id),
            vertex_buffer: None,
            element_buffer: None,
        })
    }

    /// Takes ownership of `buffer` and wires its layout into this array's slots.
    ///
    /// A previously held vertex buffer is released. `None` is rejected and
    /// leaves the array untouched.
    pub fn set_vertex_buffer(
        &mut self,
        buffer: impl Into<Option<VertexBuffer>>,
    ) -> GraphicsResult<()> {
        let buffer = buffer.into().ok_or(GraphicsError::MissingBuffer("vertex"))?;

        self.bind();
        let buffer = self.vertex_buffer.insert(buffer);
        buffer.bind();
        buffer.configure();
        Ok(())
    }

    /// Takes ownership of `buffer` and records it in this array's state.
    pub fn set_element_buffer(
        &mut self,
        buffer: impl Into<Option<ElementBuffer>>,
    ) -> GraphicsResult<()> {
        let buffer = buffer.into().ok_or(GraphicsError::MissingBuffer("element"))?;

        self.bind();
        self.element_buffer.insert(buffer).bind();
        Ok(())
    }

    pub fn vertex_buffer(&self) -> Option<&VertexBuffer> {
        self.vertex_buffer.as_ref()
    }

    pub fn element_buffer(&self) -> Option<&ElementBuffer> {
        self.element_buffer.as_ref()
    }

    pub fn id(&self) -> Option<VertexArrayId> {
        self.id
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(self.id);
    }

    pub fn unbind(&self) {
        self.gl.bind_vertex_array(None);
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.gl.delete_vertex_array(id);
            log::trace!("released vertex array {id:?}");
        }
    }
}

impl fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexArray")
            .field("id", &self.id)
            .field("vertex_buffer", &self.vertex_buffer)
            .field("element_buffer", &self.element_buffer)
            .finish()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.release();
    }
}
