//! GLFW-based window management for OpenGL rendering
//!
//! Creates the window together with its OpenGL core-profile context, makes the
//! context current on the calling thread and loads GL function pointers into a
//! [`glow::Context`]. Dropping [`Window`] destroys the window; GLFW itself is
//! terminated once the last handle to it goes away.

use crate::config::WindowConfig;
use glfw::Context as _;
use std::ffi::c_void;
use thiserror::Error;

/// Startup errors raised before any asset is touched
#[derive(Error, Debug)]
pub enum StartupError {
    /// `glfwInit` failed
    #[error("Failed to load GLFW: {0}")]
    GlfwInit(String),

    /// Window or GL context creation failed
    #[error("Failed to create {width}x{height} window with an OpenGL {major}.{minor} core context")]
    WindowCreation {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested GL major version
        major: u32,
        /// Requested GL minor version
        minor: u32,
    },

    /// GL function pointers could not be resolved
    #[error("Failed to load OpenGL functions: {0}")]
    GlLoad(String),
}

/// Events delivered by GLFW since the last poll
pub type WindowEvents<'a> = glfw::FlushedMessages<'a, (f64, glfw::WindowEvent)>;

/// GLFW window with a current OpenGL context
pub struct Window {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
}

impl Window {
    /// Initialize GLFW and open a window with an OpenGL core context
    pub fn new(config: &WindowConfig) -> Result<Self, StartupError> {
        let mut glfw =
            glfw::init(glfw::log_errors).map_err(|e| StartupError::GlfwInit(format!("{e:?}")))?;

        let (major, minor) = config.gl_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(StartupError::WindowCreation {
                width: config.width,
                height: config.height,
                major,
                minor,
            })?;

        window.make_current();

        window.set_key_polling(true);
        window.set_close_polling(true);

        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        log::info!(
            "Created {}x{} window \"{}\" (OpenGL {}.{} core, vsync {})",
            config.width,
            config.height,
            config.title,
            major,
            minor,
            config.vsync
        );

        Ok(Self {
            window,
            events,
            glfw,
        })
    }

    /// Resolve GL entry points for the current context
    pub fn load_gl(&mut self) -> Result<glow::Context, StartupError> {
        let probe = self.window.get_proc_address("glGetString") as *const c_void;
        if probe.is_null() {
            return Err(StartupError::GlLoad(
                "glGetString is not exported by the current context".to_string(),
            ));
        }

        // SAFETY: the context was made current in `new` and stays current on
        // this thread for the lifetime of the window.
        let gl = unsafe {
            glow::Context::from_loader_function(|name| {
                self.window.get_proc_address(name) as *const c_void
            })
        };

        log_opengl_driver_info(&gl);
        Ok(gl)
    }

    /// Whether a close has been requested
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Set or clear the close flag
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Process pending window-system events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Drain the events queued by the last poll
    pub fn flush_events(&self) -> WindowEvents<'_> {
        glfw::flush_messages(&self.events)
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        log::debug!("Destroying window");
    }
}

fn log_opengl_driver_info(gl: &glow::Context) {
    use glow::HasContext;

    fn norm(value: String) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            "<unknown>".to_string()
        } else {
            trimmed.to_string()
        }
    }

    // SAFETY: only queries immutable driver strings.
    unsafe {
        let vendor = norm(gl.get_parameter_string(glow::VENDOR));
        let renderer = norm(gl.get_parameter_string(glow::RENDERER));
        let version = norm(gl.get_parameter_string(glow::VERSION));
        let glsl = norm(gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION));
        log::info!("OpenGL driver: {} [{}], {}, GLSL {}", renderer, vendor, version, glsl);
    }
}
