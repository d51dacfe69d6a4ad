//! GLSL source files

use crate::assets::AssetError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Programmable pipeline stage a source file is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// OpenGL shader object type
    pub const fn gl_kind(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Shader text read from disk, not yet compiled
#[derive(Debug, Clone)]
pub struct ShaderSource {
    /// Stage the source targets
    pub stage: ShaderStage,
    /// File the source was read from
    pub path: PathBuf,
    /// GLSL text
    pub text: String,
}

impl ShaderSource {
    /// Read a shader source file
    pub fn from_file<P: AsRef<Path>>(stage: ShaderStage, path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| AssetError::from_io(path, e))?;

        if text.trim().is_empty() {
            return Err(AssetError::EmptyShader(path.to_path_buf()));
        }

        log::debug!("Read {} shader {:?} ({} bytes)", stage, path, text.len());

        Ok(Self {
            stage,
            path: path.to_path_buf(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quad_engine_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_read_source() {
        let path = temp_file("VertexShader.glsl");
        std::fs::write(&path, "#version 410\nvoid main() {}\n").unwrap();

        let source = ShaderSource::from_file(ShaderStage::Vertex, &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(source.stage, ShaderStage::Vertex);
        assert_eq!(source.path, path);
        assert!(source.text.starts_with("#version 410"));
    }

    #[test]
    fn test_missing_source() {
        let path = temp_file("FragmentShader_missing.glsl");
        let result = ShaderSource::from_file(ShaderStage::Fragment, &path);
        assert!(matches!(result, Err(AssetError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_blank_source_rejected() {
        let path = temp_file("Blank.glsl");
        std::fs::write(&path, "  \n\t\n").unwrap();
        let result = ShaderSource::from_file(ShaderStage::Fragment, &path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AssetError::EmptyShader(_))));
    }

    #[test]
    fn test_stage_mapping() {
        assert_eq!(ShaderStage::Vertex.gl_kind(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_kind(), glow::FRAGMENT_SHADER);
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
