use std::fmt;
use std::str::FromStr;

use super::error::{GraphicsError, GraphicsResult};

/// Size of one attribute component. Every component is a 32-bit float.
const COMPONENT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

/// Shape of a single vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttributeType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    /// Passed to the driver as a single 9-component attribute, which GL
    /// rejects (sizes above 4 are invalid). Declare three `Vec3` columns
    /// or `Vec4` columns instead.
    Mat3,
    /// Same limitation as [`Mat3`](Self::Mat3): declare four `Vec4` columns.
    Mat4,
}

impl AttributeType {
    /// Number of float components.
    pub const fn component_count(self) -> u32 {
        match self {
            AttributeType::Float => 1,
            AttributeType::Vec2 => 2,
            AttributeType::Vec3 => 3,
            AttributeType::Vec4 => 4,
            AttributeType::Mat3 => 9,
            AttributeType::Mat4 => 16,
        }
    }

    /// Size in bytes.
    pub const fn size(self) -> u32 {
        self.component_count() * COMPONENT_SIZE
    }
}

impl FromStr for AttributeType {
    type Err = GraphicsError;

    /// Parses GLSL-style names (`float`, `vec3`, `mat4`, ...), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "float" => Ok(AttributeType::Float),
            "vec2" => Ok(AttributeType::Vec2),
            "vec3" => Ok(AttributeType::Vec3),
            "vec4" => Ok(AttributeType::Vec4),
            "mat3" => Ok(AttributeType::Mat3),
            "mat4" => Ok(AttributeType::Mat4),
            _ => Err(GraphicsError::UnknownAttributeType(s.to_string())),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::Float => "float",
            AttributeType::Vec2 => "vec2",
            AttributeType::Vec3 => "vec3",
            AttributeType::Vec4 => "vec4",
            AttributeType::Mat3 => "mat3",
            AttributeType::Mat4 => "mat4",
        };
        f.write_str(name)
    }
}

/// One named field of a vertex record.
///
/// `offset` is assigned when the attribute is packed into a [`VertexLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    name: String,
    ty: AttributeType,
    offset: u32,
}

impl VertexAttribute {
    pub fn new(name: impl Into<String>, ty: AttributeType) -> Self {
        Self {
            name: name.into(),
            ty,
            offset: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> AttributeType {
        self.ty
    }

    pub fn size(&self) -> u32 {
        self.ty.size()
    }

    pub fn component_count(&self) -> u32 {
        self.ty.component_count()
    }

    /// Byte offset from the start of the vertex record.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// Memory layout of one vertex record.
///
/// Attribute order is slot order: the attribute at index `i` is wired to shader
/// input slot `i`. Offsets are the running sum of preceding sizes and the stride
/// is the sum of all sizes. The layout is immutable once built and is copied by
/// value into each buffer that uses it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
}

impl VertexLayout {
    /// Packs `(name, type)` pairs in declaration order.
    pub fn new<I, N>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, AttributeType)>,
        N: Into<String>,
    {
        attributes
            .into_iter()
            .map(|(name, ty)| VertexAttribute::new(name, ty))
            .collect()
    }

    /// Packs `(name, type name)` pairs, e.g. `("aPos", "vec3")`.
    ///
    /// Fails on the first type name that is not recognized.
    pub fn parse<'a, I>(attributes: I) -> GraphicsResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        attributes
            .into_iter()
            .map(|(name, ty)| Ok(VertexAttribute::new(name, ty.parse()?)))
            .collect()
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VertexAttribute> {
        self.attributes.iter()
    }
}

impl FromIterator<VertexAttribute> for VertexLayout {
    fn from_iter<T: IntoIterator<Item = VertexAttribute>>(iter: T) -> Self {
        let mut attributes: Vec<VertexAttribute> = iter.into_iter().collect();

        let mut offset = 0;
        for attribute in &mut attributes {
            attribute.offset = offset;
            offset += attribute.size();
        }

        Self {
            attributes,
            stride: offset,
        }
    }
}

impl<'a> IntoIterator for &'a VertexLayout {
    type Item = &'a VertexAttribute;
    type IntoIter = std::slice::Iter<'a, VertexAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
