//! Textured quad demo
//!
//! Opens an 800x800 OpenGL window, textures a full-screen quad with
//! `wood_floor.bmp` using `VertexShader.glsl`/`FragmentShader.glsl` from the
//! working directory, and exits on Escape or window close.

use quad_engine::prelude::*;
use std::process::ExitCode;

fn run(app: &mut Application) -> Result<(), AppError> {
    app.initialize()?;
    app.load_assets()?;
    app.run();
    app.shutdown();
    Ok(())
}

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {panic_info}");
    }));

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting textured quad demo");

    let mut app = Application::new(AppConfig::default());
    match run(&mut app) {
        Ok(()) => {
            log::info!("Textured quad demo completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Textured quad demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
