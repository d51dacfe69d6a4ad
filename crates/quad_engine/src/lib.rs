//! # Quad Engine
//!
//! Small OpenGL plumbing crate behind the textured quad demo.
//!
//! ## Features
//!
//! - **GLFW Windowing**: OpenGL 4.1 core context with vsync
//! - **Asset Loading**: BMP/PNG textures via `image`, GLSL sources from disk
//! - **GPU Resources**: texture, program and quad geometry with ordered teardown
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quad_engine::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     let mut app = Application::new(AppConfig::default());
//!     app.initialize()?;
//!     app.load_assets()?;
//!     app.run();
//!     app.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod assets;
pub mod config;
pub mod input;
pub mod render;

mod application;

pub use application::{AppError, Application};
pub use render::StartupError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, Application, StartupError,
        assets::{AssetError, image_loader::ImageData, shader_source::{ShaderSource, ShaderStage}},
        config::{AppConfig, Config, ConfigError},
        input::{InputAction, InputState},
    };
}
