//! Configuration system
//!
//! [`AppConfig`] carries every constant the demo needs: window geometry,
//! context version, asset file names, sampler state and clear color. The
//! binary runs with [`AppConfig::default`]; the [`Config`] trait lets tools and
//! tests persist or load a configuration as TOML.

pub use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        if !path.ends_with(".toml") {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        if !path.ends_with(".toml") {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of range or missing
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Window and OpenGL context settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Requested OpenGL context version (major, minor), core profile
    pub gl_version: (u32, u32),
    /// Wait for vertical blank when presenting
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Assignment 2 - Raytracing".to_string(),
            width: 800,
            height: 800,
            gl_version: (4, 1),
            vsync: true,
        }
    }
}

/// Asset file locations, relative to the working directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Bitmap used as the quad texture
    pub texture_path: PathBuf,
    /// GLSL vertex shader source
    pub vertex_shader_path: PathBuf,
    /// GLSL fragment shader source
    pub fragment_shader_path: PathBuf,
    /// Name of the sampler uniform in the fragment shader
    pub sampler_uniform: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_path: PathBuf::from("wood_floor.bmp"),
            vertex_shader_path: PathBuf::from("VertexShader.glsl"),
            fragment_shader_path: PathBuf::from("FragmentShader.glsl"),
            sampler_uniform: "planeTex".to_string(),
        }
    }
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplerFilter {
    /// Bilinear
    Linear,
    /// Point sampling
    Nearest,
}

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplerWrap {
    /// Tile the texture
    Repeat,
    /// Clamp to the edge texel
    Clamp,
}

/// Sampler state applied to the quad texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerDesc {
    /// Min and mag filter
    pub filter: SamplerFilter,
    /// Wrap mode for both S and T
    pub wrap: SamplerWrap,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            filter: SamplerFilter::Linear,
            wrap: SamplerWrap::Repeat,
        }
    }
}

/// Fixed-function state used by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// RGBA clear color
    pub clear_color: [f32; 4],
    /// Enable back-face culling
    pub cull_back_faces: bool,
    /// Enable depth testing
    pub depth_test: bool,
    /// Quad texture sampler state
    pub sampler: SamplerDesc,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.6, 0.7, 0.9, 1.0],
            cull_back_faces: true,
            depth_test: true,
            sampler: SamplerDesc::default(),
        }
    }
}

/// Complete configuration for the demo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window and context
    pub window: WindowConfig,
    /// Asset files
    pub assets: AssetConfig,
    /// Renderer state
    pub render: RenderConfig,
}

impl Config for AppConfig {}

impl AppConfig {
    /// Check that the configuration can produce a working window and pipeline
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} has a zero dimension",
                self.window.width, self.window.height
            )));
        }

        // Core profiles only exist from 3.2 onwards
        if self.window.gl_version < (3, 2) {
            return Err(ConfigError::Invalid(format!(
                "OpenGL {}.{} has no core profile",
                self.window.gl_version.0, self.window.gl_version.1
            )));
        }

        let paths = [
            ("texture", &self.assets.texture_path),
            ("vertex shader", &self.assets.vertex_shader_path),
            ("fragment shader", &self.assets.fragment_shader_path),
        ];
        for (what, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!("{what} path is empty")));
            }
        }

        if self.assets.sampler_uniform.is_empty() {
            return Err(ConfigError::Invalid("sampler uniform name is empty".to_string()));
        }

        if self
            .render
            .clear_color
            .iter()
            .any(|c| !(0.0..=1.0).contains(c))
        {
            return Err(ConfigError::Invalid(format!(
                "clear color {:?} is outside [0, 1]",
                self.render.clear_color
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("quad_engine_{}_{name}", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_defaults_match_demo_constants() {
        let config = AppConfig::default();
        assert_eq!(config.window.title, "Assignment 2 - Raytracing");
        assert_eq!((config.window.width, config.window.height), (800, 800));
        assert_eq!(config.window.gl_version, (4, 1));
        assert!(config.window.vsync);
        assert_eq!(config.assets.texture_path, PathBuf::from("wood_floor.bmp"));
        assert_eq!(config.assets.sampler_uniform, "planeTex");
        assert_relative_eq!(config.render.clear_color[0], 0.6);
        assert_relative_eq!(config.render.clear_color[1], 0.7);
        assert_relative_eq!(config.render.clear_color[2], 0.9);
        assert_relative_eq!(config.render.clear_color[3], 1.0);
        assert_eq!(config.render.sampler, SamplerDesc::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.window.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.window.gl_version = (3, 1);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.assets.fragment_shader_path = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.render.clear_color[2] = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_toml_file_persistence() {
        let path = temp_path("config.toml");
        let mut config = AppConfig::default();
        config.window.title = "Custom".to_string();
        config.render.sampler.filter = SamplerFilter::Nearest;

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_and_missing_files() {
        assert!(matches!(
            AppConfig::load_from_file("settings.ron"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            AppConfig::default().save_to_file("settings.json"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            AppConfig::load_from_file(&temp_path("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        let path = temp_path("broken.toml");
        std::fs::write(&path, "window = 5").unwrap();
        let result = AppConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
