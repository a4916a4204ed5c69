use std::fmt;
use std::rc::Rc;

use bytemuck::Pod;

use crate::gl::{BufferId, BufferTarget, GlApi};

use super::attribute::VertexLayout;
use super::error::{GraphicsError, GraphicsResult};

/// Creates a buffer, uploads `data` once with a static hint and leaves `target` unbound.
fn upload(gl: &dyn GlApi, target: BufferTarget, data: &[u8]) -> GraphicsResult<BufferId> {
    let id = gl
        .create_buffer()
        .map_err(|e| GraphicsError::allocation("buffer", e))?;

    gl.bind_buffer(target, Some(id));
    gl.buffer_data_static(target, data);
    gl.bind_buffer(target, None);

    log::trace!("created {target:?} buffer {id:?} ({} bytes)", data.len());
    Ok(id)
}

/// Vertex data on the GPU plus the layout describing one record.
///
/// Not `Clone`: the buffer handle has exactly one owner and is deleted on drop.
pub struct VertexBuffer {
    gl: Rc<dyn GlApi>,
    id: Option<BufferId>,
    layout: VertexLayout,
}

impl VertexBuffer {
    /// Uploads raw vertex bytes. The layout starts empty.
    pub fn new(gl: Rc<dyn GlApi>, data: &[u8]) -> GraphicsResult<Self> {
        let id = upload(gl.as_ref(), BufferTarget::Array, data)?;
        Ok(Self {
            gl,
            id: Some(id),
            layout: VertexLayout::default(),
        })
    }

    pub fn from_slice<T: Pod>(gl: Rc<dyn GlApi>, vertices: &[T]) -> GraphicsResult<Self> {
        Self::new(gl, bytemuck::cast_slice(vertices))
    }

    /// Stores a copy of `layout`.
    ///
    /// Only takes effect on the GPU the next time the buffer is attached to a
    /// vertex array; an already attached buffer keeps its old slot setup.
    pub fn set_layout(&mut self, layout: &VertexLayout) {
        self.layout = layout.clone();
    }

    pub fn with_layout(mut self, layout: &VertexLayout) -> Self {
        self.set_layout(layout);
        self
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn id(&self) -> Option<BufferId> {
        self.id
    }

    pub fn bind(&self) {
        self.gl.bind_buffer(BufferTarget::Array, self.id);
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(BufferTarget::Array, None);
    }

    /// Wires slot `i` to the `i`-th attribute of the layout and enables it.
    ///
    /// Expects this buffer and the target vertex array to be bound.
    pub(crate) fn configure(&self) {
        let stride = self.layout.stride() as i32;
        for (slot, attribute) in self.layout.iter().enumerate() {
            let slot = slot as u32;
            self.gl.vertex_attrib_pointer_f32(
                slot,
                attribute.component_count() as i32,
                stride,
                attribute.offset() as i32,
            );
            self.gl.enable_vertex_attrib_array(slot);
        }
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.gl.delete_buffer(id);
            log::trace!("released vertex buffer {id:?}");
        }
    }
}

impl fmt::Debug for VertexBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexBuffer")
            .field("id", &self.id)
            .field("layout", &self.layout)
            .finish()
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        self.release();
    }
}

/// `u32` index data on the GPU.
pub struct ElementBuffer {
    gl: Rc<dyn GlApi>,
    id: Option<BufferId>,
    count: usize,
}

impl ElementBuffer {
    pub fn new(gl: Rc<dyn GlApi>, indices: &[u32]) -> GraphicsResult<Self> {
        let id = upload(gl.as_ref(), BufferTarget::ElementArray, bytemuck::cast_slice(indices))?;
        Ok(Self {
            gl,
            id: Some(id),
            count: indices.len(),
        })
    }

    /// Number of indices uploaded.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn id(&self) -> Option<BufferId> {
        self.id
    }

    pub fn bind(&self) {
        self.gl.bind_buffer(BufferTarget::ElementArray, self.id);
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(BufferTarget::ElementArray, None);
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.gl.delete_buffer(id);
            log::trace!("released element buffer {id:?}");
        }
    }
}

impl fmt::Debug for ElementBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementBuffer")
            .field("id", &self.id)
            .field("count", &self.count)
            .finish()
    }
}

impl Drop for ElementBuffer {
    fn drop(&mut self) {
        self.release();
    }
}
