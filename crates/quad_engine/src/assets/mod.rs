//! Asset loading
//!
//! Decoding of the quad texture and reading of GLSL sources. Compilation and
//! upload happen in [`crate::render`]; everything here runs without a GL
//! context.

pub mod image_loader;
pub mod shader_source;

use std::path::PathBuf;
use thiserror::Error;

pub use shader_source::ShaderStage;

/// Asset loading and GPU program build errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The asset file does not exist
    #[error("Unable to open {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The image decoder rejected the file
    #[error("Failed to decode {}: {message}", .path.display())]
    Decode {
        /// Image file
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// Shader source file contains no code
    #[error("Shader source {} is empty", .0.display())]
    EmptyShader(PathBuf),

    /// Shader compilation failed
    #[error("Failed to compile {stage} shader {}: {log}", .path.display())]
    ShaderCompile {
        /// Pipeline stage
        stage: ShaderStage,
        /// Source file
        path: PathBuf,
        /// Driver info log
        log: String,
    },

    /// Program linking failed
    #[error("Failed to link GPU program: {0}")]
    ProgramLink(String),

    /// The driver refused to create a GL object
    #[error("Failed to create {what}: {message}")]
    GpuObject {
        /// Kind of object
        what: &'static str,
        /// Driver message
        message: String,
    },
}

impl AssetError {
    /// Map an IO error on `path` to `NotFound` or `Io`
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}
