//! Full-screen quad geometry
//!
//! Four corners in normalized device coordinates, drawn as a triangle strip so
//! no index buffer is needed.

use crate::assets::AssetError;
use glow::HasContext;
use std::mem;

/// Vertex attribute location of the 2D position
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Components per vertex position
pub const POSITION_COMPONENTS: i32 = 2;

/// Byte stride between consecutive vertices
pub const VERTEX_STRIDE: i32 = (POSITION_COMPONENTS as usize * mem::size_of::<f32>()) as i32;

/// Strip order: top-left, bottom-left, top-right, bottom-right
pub const QUAD_VERTICES: [[f32; 2]; 4] = [
    [-1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [1.0, -1.0],
];

/// Number of vertices issued by the draw call
pub const QUAD_VERTEX_COUNT: i32 = QUAD_VERTICES.len() as i32;

/// Triangles a strip of `vertices` expands to, with consistent winding
///
/// Every odd triangle has its first two vertices swapped, which is how GL
/// keeps the facing of a strip uniform.
pub fn strip_triangles(vertices: &[[f32; 2]]) -> Vec<[[f32; 2]; 3]> {
    vertices
        .windows(3)
        .enumerate()
        .map(|(i, w)| {
            if i % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            }
        })
        .collect()
}

/// Twice the signed area of a triangle; positive when counter-clockwise
pub fn signed_area2(triangle: &[[f32; 2]; 3]) -> f32 {
    let [a, b, c] = triangle;
    (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
}

/// Upload [`QUAD_VERTICES`] into a static vertex buffer
pub fn upload_vertex_buffer(gl: &glow::Context) -> Result<glow::Buffer, AssetError> {
    // SAFETY: buffer creation and upload on the current context.
    unsafe {
        let vbo = gl
            .create_buffer()
            .map_err(|message| AssetError::GpuObject { what: "vertex buffer", message })?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_VERTICES),
            glow::STATIC_DRAW,
        );
        log::debug!("Uploaded {} quad vertices", QUAD_VERTEX_COUNT);
        Ok(vbo)
    }
}

/// Create a vertex array reading positions from `vertex_buffer`
pub fn create_vertex_array(
    gl: &glow::Context,
    vertex_buffer: glow::Buffer,
) -> Result<glow::VertexArray, AssetError> {
    // SAFETY: `vertex_buffer` holds QUAD_VERTICES laid out at VERTEX_STRIDE.
    unsafe {
        let vao = gl
            .create_vertex_array()
            .map_err(|message| AssetError::GpuObject { what: "vertex array", message })?;
        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));

        gl.vertex_attrib_pointer_f32(
            POSITION_ATTRIBUTE,
            POSITION_COMPONENTS,
            glow::FLOAT,
            false,
            VERTEX_STRIDE,
            0,
        );
        gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);
        Ok(vao)
    }
}
