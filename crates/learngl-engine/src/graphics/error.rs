use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::gl::ShaderStage;

/// Failure raised by the graphics wrappers.
///
/// Nothing here is recovered locally; callers propagate to the top-level driver.
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("unrecognized vertex attribute type `{0}`")]
    UnknownAttributeType(String),

    #[error("{0} buffer cannot be null")]
    MissingBuffer(&'static str),

    #[error("{width}x{height} RGBA8 texture needs {expected} bytes, got {actual}")]
    PixelDataSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("failed to read shader source `{}`", path.display())]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("could not link GLSL program:\n{log}")]
    Link { log: String },

    #[error("uniform `{name}` could not be found")]
    UniformNotFound { name: String },

    #[error("failed to create {object}: {reason}")]
    Allocation { object: &'static str, reason: String },
}

/// Coarse failure category.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Invalid setup: unknown attribute type, missing buffer, mis-sized pixels.
    Configuration,
    /// A shader source could not be read.
    ResourceLoad,
    Compile,
    Link,
    /// A named uniform does not exist in the linked program.
    UniformResolution,
    /// The driver refused to create an object.
    Allocation,
}

impl GraphicsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphicsError::UnknownAttributeType(_)
            | GraphicsError::MissingBuffer(_)
            | GraphicsError::PixelDataSize { .. } => ErrorKind::Configuration,
            GraphicsError::ShaderRead { .. } => ErrorKind::ResourceLoad,
            GraphicsError::Compile { .. } => ErrorKind::Compile,
            GraphicsError::Link { .. } => ErrorKind::Link,
            GraphicsError::UniformNotFound { .. } => ErrorKind::UniformResolution,
            GraphicsError::Allocation { .. } => ErrorKind::Allocation,
        }
    }

    pub(crate) fn allocation(object: &'static str, reason: String) -> Self {
        GraphicsError::Allocation { object, reason }
    }
}

pub type GraphicsResult<T> = Result<T, GraphicsError>;
