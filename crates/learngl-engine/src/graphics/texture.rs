use std::fmt;
use std::rc::Rc;

use crate::gl::{GlApi, TextureId};

use super::error::{GraphicsError, GraphicsResult};

/// A mipmapped RGBA8 2D texture.
pub struct Texture2D {
    gl: Rc<dyn GlApi>,
    id: Option<TextureId>,
    width: u32,
    height: u32,
}

impl Texture2D {
    /// Uploads tightly packed RGBA8 pixels, row 0 first.
    ///
    /// `pixels.len()` must equal `width * height * 4`.
    pub fn from_rgba8(
        gl: Rc<dyn GlApi>,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> GraphicsResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(GraphicsError::PixelDataSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        let id = gl
            .create_texture()
            .map_err(|e| GraphicsError::allocation("texture", e))?;

        gl.bind_texture_2d(Some(id));
        gl.upload_texture_2d_rgba8(width, height, pixels);
        gl.bind_texture_2d(None);

        log::trace!("created texture {id:?} ({width}x{height})");
        Ok(Self {
            gl,
            id: Some(id),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn id(&self) -> Option<TextureId> {
        self.id
    }

    /// Activates texture unit `unit` and binds this texture to it.
    pub fn bind(&self, unit: u32) {
        self.gl.active_texture(unit);
        self.gl.bind_texture_2d(self.id);
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.gl.delete_texture(id);
            log::trace!("released texture {id:?}");
        }
    }
}

impl fmt::Debug for Texture2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture2D")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        self.release();
    }
}
