//! Application driver
//!
//! [`Application`] owns the window, the renderer and the input state, and
//! sequences startup, the render loop and teardown. Any setup failure tears
//! down whatever was already acquired before the error is returned.

use crate::assets::{
    image_loader::ImageData,
    shader_source::{ShaderSource, ShaderStage},
    AssetError,
};
use crate::config::{AppConfig, ConfigError};
use crate::input::InputState;
use crate::render::{Renderer, StartupError, Window};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Window, context or GL loader failure
    #[error("Startup error: {0}")]
    Startup(#[from] StartupError),

    /// Texture or shader failure
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A step ran before `initialize` succeeded
    #[error("Application is not initialized")]
    NotInitialized,
}

/// The demo: one window, one textured quad
pub struct Application {
    config: AppConfig,
    window: Option<Window>,
    renderer: Option<Renderer>,
    input: InputState,
}

impl Application {
    /// Create the driver; nothing is acquired until [`Application::initialize`]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            renderer: None,
            input: InputState::new(),
        }
    }

    /// Configuration in use
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Open the window, create the GL context and load GL functions
    ///
    /// Anything acquired by an earlier call is released first.
    pub fn initialize(&mut self) -> Result<(), AppError> {
        let result = self.try_initialize();
        self.abort_on_error(result)
    }

    fn try_initialize(&mut self) -> Result<(), AppError> {
        if self.is_initialized() {
            log::warn!("initialize called twice; tearing down the previous window first");
        }
        self.shutdown();
        self.config.validate()?;

        log::info!("Creating window...");
        let window = self.window.insert(Window::new(&self.config.window)?);

        log::info!("Loading OpenGL functions...");
        let gl = window.load_gl()?;
        self.renderer = Some(Renderer::new(gl));
        Ok(())
    }

    /// Load the texture and shaders, then build the rest of the pipeline
    pub fn load_assets(&mut self) -> Result<(), AppError> {
        let result = self.try_load_assets();
        self.abort_on_error(result)
    }

    fn try_load_assets(&mut self) -> Result<(), AppError> {
        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return Err(AppError::NotInitialized);
        };
        let assets = &self.config.assets;

        let image = ImageData::from_file(&assets.texture_path)?;
        renderer.load_texture(&image, self.config.render.sampler)?;

        let vertex = ShaderSource::from_file(ShaderStage::Vertex, &assets.vertex_shader_path)?;
        let fragment =
            ShaderSource::from_file(ShaderStage::Fragment, &assets.fragment_shader_path)?;
        renderer.load_program(&vertex, &fragment)?;

        renderer.create_square()?;
        renderer.init_uniforms(&assets.sampler_uniform)?;
        renderer.init_input_assembler()?;
        renderer.init_pipeline_state(window.framebuffer_size(), &self.config.render);

        log::info!("Assets loaded ({} GPU objects)", renderer.live_objects());
        Ok(())
    }

    /// Draw one frame and present it
    pub fn render(&mut self) {
        if let (Some(window), Some(renderer)) = (self.window.as_mut(), self.renderer.as_ref()) {
            renderer.draw_frame();
            window.swap_buffers();
        }
    }

    /// Poll events and render until a close signal arrives
    ///
    /// Returns the number of frames rendered.
    pub fn run(&mut self) -> u64 {
        let mut frames = 0;
        log::info!("Entering render loop");

        while self.window.as_ref().is_some_and(|w| !w.should_close()) {
            self.process_events();
            self.render();
            frames += 1;
        }

        log::info!("Render loop finished after {} frames", frames);
        frames
    }

    fn process_events(&mut self) {
        let Some(window) = self.window.as_mut() else {
            return;
        };

        window.poll_events();
        for (_, event) in window.flush_events() {
            self.input.apply(&event);
        }

        if self.input.close_requested() {
            window.set_should_close(true);
        }
    }

    /// Whether a close signal has been observed
    pub const fn close_requested(&self) -> bool {
        self.input.close_requested()
    }

    /// Whether the window and GL context exist
    pub const fn is_initialized(&self) -> bool {
        self.window.is_some() && self.renderer.is_some()
    }

    /// GL objects currently owned
    pub fn live_gpu_objects(&self) -> usize {
        self.renderer.as_ref().map_or(0, Renderer::live_objects)
    }

    /// Release GPU objects, then the window and GLFW
    ///
    /// Safe to call at any point and any number of times.
    pub fn shutdown(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.destroy();
        }
        if self.window.take().is_some() {
            log::info!("Shut down");
        }
    }

    fn abort_on_error(&mut self, result: Result<(), AppError>) -> Result<(), AppError> {
        if let Err(e) = &result {
            log::debug!("Startup aborted: {}", e);
            self.shutdown();
        }
        result
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_acquires_nothing() {
        let app = Application::new(AppConfig::default());
        assert!(!app.is_initialized());
        assert!(!app.close_requested());
        assert_eq!(app.live_gpu_objects(), 0);
        assert_eq!(app.config().window.title, "Assignment 2 - Raytracing");
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut app = Application::new(AppConfig::default());
        app.shutdown();
        app.shutdown();
        assert!(!app.is_initialized());
    }

    #[test]
    fn test_load_assets_requires_initialize() {
        let mut app = Application::new(AppConfig::default());
        assert!(matches!(app.load_assets(), Err(AppError::NotInitialized)));
        assert!(!app.is_initialized());
    }

    #[test]
    fn test_run_without_window_returns_immediately() {
        let mut app = Application::new(AppConfig::default());
        assert_eq!(app.run(), 0);
        app.render();
    }

    #[test]
    fn test_invalid_config_fails_before_window() {
        let mut config = AppConfig::default();
        config.window.height = 0;
        let mut app = Application::new(config);

        assert!(matches!(app.initialize(), Err(AppError::Config(_))));
        assert!(!app.is_initialized());
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::from(AssetError::NotFound("wood_floor.bmp".into()));
        assert_eq!(err.to_string(), "Asset error: Unable to open wood_floor.bmp");
        assert_eq!(
            AppError::NotInitialized.to_string(),
            "Application is not initialized"
        );
    }
}
