//! Shader compilation and program linking

use crate::assets::{shader_source::ShaderSource, AssetError};
use glow::HasContext;

/// Compile a vertex/fragment pair and link them into a program
///
/// Shader objects are deleted before returning, whether or not linking
/// succeeded. On failure no GL object survives.
pub fn compile_program(
    gl: &glow::Context,
    vertex: &ShaderSource,
    fragment: &ShaderSource,
) -> Result<glow::Program, AssetError> {
    let vert = compile_shader(gl, vertex)?;
    let frag = match compile_shader(gl, fragment) {
        Ok(frag) => frag,
        Err(e) => {
            // SAFETY: `vert` was created above and is not referenced elsewhere.
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    // SAFETY: both shaders compiled on the current context.
    let result = unsafe { link(gl, vert, frag) };

    // SAFETY: the program keeps its own reference to linked code.
    unsafe {
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    let program = result?;
    log::info!(
        "Linked GPU program from {:?} and {:?}",
        vertex.path,
        fragment.path
    );
    Ok(program)
}

fn compile_shader(gl: &glow::Context, source: &ShaderSource) -> Result<glow::Shader, AssetError> {
    // SAFETY: object creation and compilation on the current context.
    unsafe {
        let shader = gl
            .create_shader(source.stage.gl_kind())
            .map_err(|message| AssetError::GpuObject { what: "shader", message })?;
        gl.shader_source(shader, &source.text);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            log::error!("{} shader {:?} failed to compile:\n{}", source.stage, source.path, log);
            return Err(AssetError::ShaderCompile {
                stage: source.stage,
                path: source.path.clone(),
                log,
            });
        }

        log::debug!("Compiled {} shader {:?}", source.stage, source.path);
        Ok(shader)
    }
}

unsafe fn link(
    gl: &glow::Context,
    vert: glow::Shader,
    frag: glow::Shader,
) -> Result<glow::Program, AssetError> {
    let program = gl
        .create_program()
        .map_err(|message| AssetError::GpuObject { what: "program", message })?;

    gl.attach_shader(program, vert);
    gl.attach_shader(program, frag);
    gl.link_program(program);

    let linked = gl.get_program_link_status(program);
    gl.detach_shader(program, vert);
    gl.detach_shader(program, frag);

    if !linked {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        log::error!("GPU program failed to link:\n{}", log);
        return Err(AssetError::ProgramLink(log));
    }

    Ok(program)
}
