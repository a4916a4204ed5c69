//! Procedural stand-ins for the classic wooden crate and smiley face textures.

use std::rc::Rc;

use image::{imageops, Rgba, RgbaImage};

use learngl_engine::gl::GlApi;
use learngl_engine::graphics::{GraphicsResult, Texture2D};

const PLANK_COUNT: u32 = 4;

/// Wooden planks inside a darker frame.
pub fn crate_image(size: u32) -> RgbaImage {
    let frame = (size / 10).max(1);
    let plank = (size / PLANK_COUNT).max(1);

    RgbaImage::from_fn(size, size, |x, y| {
        let edge = x.min(y).min(size - 1 - x).min(size - 1 - y);
        if edge < frame {
            return Rgba([92, 58, 28, 255]);
        }

        // Dark seam between planks, faint grain along them.
        if y % plank == 0 {
            return Rgba([70, 44, 20, 255]);
        }
        let grain = ((x as f32 * 0.35 + (y / plank) as f32 * 7.0).sin() * 12.0) as i16;
        let shade = |c: u8| (c as i16 + grain).clamp(0, 255) as u8;
        Rgba([shade(176), shade(124), shade(66), 255])
    })
}

/// Yellow smiley on a transparent background.
pub fn face_image(size: u32) -> RgbaImage {
    let s = size as f32;
    RgbaImage::from_fn(size, size, |x, y| {
        // Normalized coordinates in [-1, 1], y up.
        let px = (x as f32 + 0.5) / s * 2.0 - 1.0;
        let py = 1.0 - (y as f32 + 0.5) / s * 2.0;
        let r = (px * px + py * py).sqrt();

        if r > 0.9 {
            return Rgba([0, 0, 0, 0]);
        }

        let eye = |cx: f32| ((px - cx).powi(2) + (py - 0.3).powi(2)).sqrt() < 0.12;
        let mouth = py < -0.1 && (r - 0.55).abs() < 0.06;
        if eye(-0.3) || eye(0.3) || mouth || r > 0.85 {
            Rgba([60, 40, 10, 255])
        } else {
            Rgba([250, 210, 40, 255])
        }
    })
}

/// Uploads `image` with row 0 at the bottom, as GL texture coordinates expect.
pub fn upload(gl: Rc<dyn GlApi>, image: &RgbaImage) -> GraphicsResult<Texture2D> {
    let flipped = imageops::flip_vertical(image);
    Texture2D::from_rgba8(gl, flipped.width(), flipped.height(), flipped.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_frame_is_darker_than_planks() {
        let img = crate_image(128);
        let frame = img.get_pixel(2, 64);
        let plank = img.get_pixel(64, 60);
        assert!(frame.0[0] < plank.0[0]);
        assert_eq!(plank.0[3], 255);
    }

    #[test]
    fn face_is_opaque_in_the_middle_and_clear_at_corners() {
        let img = face_image(64);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(32, 40).0, [250, 210, 40, 255]);
    }

    #[test]
    fn eyes_sit_in_the_upper_half() {
        let img = face_image(100);
        // (-0.3, 0.3) in normalized space.
        assert_eq!(img.get_pixel(35, 35).0, [60, 40, 10, 255]);
    }
}
