//! Unit cube meshes, generated face by face.
//!
//! Every mesh is a plain triangle list (36 vertices, no index buffer) centred
//! on the origin with edge length 1.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use learngl_engine::graphics::{AttributeType, VertexLayout};

pub const CUBE_VERTEX_COUNT: usize = 36;

/// Position + texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl TexturedVertex {
    pub fn layout() -> VertexLayout {
        VertexLayout::new([("aPos", AttributeType::Vec3), ("aTexCoord", AttributeType::Vec2)])
    }
}

/// Position + face normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl LitVertex {
    pub fn layout() -> VertexLayout {
        VertexLayout::new([("aPos", AttributeType::Vec3), ("aNormal", AttributeType::Vec3)])
    }
}

pub fn position_layout() -> VertexLayout {
    VertexLayout::new([("aPos", AttributeType::Vec3)])
}

/// Outward normal plus two in-plane axes with `u × v = normal`.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
];

/// Two counter-clockwise triangles over the unit square.
const QUAD: [(f32, f32); 6] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)];

/// Calls `emit(position, normal, (s, t))` for each cube vertex in draw order.
fn for_each_vertex(mut emit: impl FnMut(Vec3, Vec3, (f32, f32))) {
    for (normal, u, v) in FACES {
        for (s, t) in QUAD {
            let position = normal * 0.5 + u * (s - 0.5) + v * (t - 0.5);
            emit(position, normal, (s, t));
        }
    }
}

pub fn textured_cube() -> Vec<TexturedVertex> {
    let mut vertices = Vec::with_capacity(CUBE_VERTEX_COUNT);
    for_each_vertex(|p, _, (s, t)| {
        vertices.push(TexturedVertex { position: p.to_array(), uv: [s, t] });
    });
    vertices
}

pub fn lit_cube() -> Vec<LitVertex> {
    let mut vertices = Vec::with_capacity(CUBE_VERTEX_COUNT);
    for_each_vertex(|p, n, _| {
        vertices.push(LitVertex { position: p.to_array(), normal: n.to_array() });
    });
    vertices
}

pub fn position_cube() -> Vec<[f32; 3]> {
    let mut vertices = Vec::with_capacity(CUBE_VERTEX_COUNT);
    for_each_vertex(|p, _, _| vertices.push(p.to_array()));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_axes_are_right_handed() {
        for (normal, u, v) in FACES {
            assert_eq!(u.cross(v), normal);
        }
    }

    #[test]
    fn cube_has_36_corner_vertices() {
        let cube = position_cube();
        assert_eq!(cube.len(), CUBE_VERTEX_COUNT);
        for p in cube {
            assert!(p.iter().all(|c| c.abs() == 0.5), "{p:?} is not a corner");
        }
    }

    #[test]
    fn normals_point_outwards() {
        for vertex in lit_cube() {
            let (p, n) = (Vec3::from(vertex.position), Vec3::from(vertex.normal));
            assert_eq!(n.length(), 1.0);
            assert_eq!(p.dot(n), 0.5);
        }
    }

    #[test]
    fn texture_coordinates_cover_each_face() {
        let cube = textured_cube();
        for face in cube.chunks(6) {
            let uvs: Vec<[f32; 2]> = face.iter().map(|v| v.uv).collect();
            assert!(uvs.contains(&[0.0, 0.0]));
            assert!(uvs.contains(&[1.0, 1.0]));
        }
    }

    #[test]
    fn vertex_structs_match_their_layouts() {
        assert_eq!(TexturedVertex::layout().stride() as usize, size_of::<TexturedVertex>());
        assert_eq!(LitVertex::layout().stride() as usize, size_of::<LitVertex>());
        assert_eq!(position_layout().stride() as usize, size_of::<[f32; 3]>());
    }
}
