//! Rendering
//!
//! Window and context creation plus the GL objects behind the quad.

pub mod quad;
pub mod renderer;
pub mod resources;
pub mod shader;
pub mod texture;
pub mod window;

pub use renderer::{FrameRenderState, Renderer};
pub use window::{StartupError, Window};
