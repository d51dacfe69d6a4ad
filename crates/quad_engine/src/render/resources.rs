//! GPU object release ledger
//!
//! Every GL object the renderer creates is pushed onto a [`ReleaseStack`].
//! Teardown pops the stack, so objects are deleted in reverse order of
//! acquisition no matter how far initialization got. A drained stack releases
//! nothing, which makes repeated teardown a no-op.

use glow::HasContext;

/// A GL object owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuResource {
    /// 2D texture
    Texture(glow::Texture),
    /// Linked shader program
    Program(glow::Program),
    /// Vertex buffer
    Buffer(glow::Buffer),
    /// Vertex array object
    VertexArray(glow::VertexArray),
}

impl GpuResource {
    /// Delete the object from the current context
    pub fn delete(self, gl: &glow::Context) {
        log::debug!("Deleting {:?}", self);
        // SAFETY: handles on the stack were created by `gl` and are deleted once.
        unsafe {
            match self {
                Self::Texture(texture) => gl.delete_texture(texture),
                Self::Program(program) => gl.delete_program(program),
                Self::Buffer(buffer) => gl.delete_buffer(buffer),
                Self::VertexArray(vertex_array) => gl.delete_vertex_array(vertex_array),
            }
        }
    }
}

/// Ordered record of acquired resources
#[derive(Debug)]
pub struct ReleaseStack<T> {
    entries: Vec<T>,
}

impl<T> Default for ReleaseStack<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ReleaseStack<T> {
    /// Empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly acquired resource
    pub fn push(&mut self, resource: T) {
        self.entries.push(resource);
    }

    /// Release everything, newest first, returning how many were released
    pub fn release_all(&mut self, mut release: impl FnMut(T)) -> usize {
        let count = self.entries.len();
        while let Some(resource) = self.entries.pop() {
            release(resource);
        }
        count
    }

    /// Number of resources still held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn id(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_release_in_reverse_order() {
        let mut stack = ReleaseStack::new();
        stack.push(GpuResource::Texture(glow::NativeTexture(id(1))));
        stack.push(GpuResource::Program(glow::NativeProgram(id(2))));
        stack.push(GpuResource::Buffer(glow::NativeBuffer(id(3))));
        stack.push(GpuResource::VertexArray(glow::NativeVertexArray(id(4))));

        let mut released = Vec::new();
        let count = stack.release_all(|r| released.push(r));

        assert_eq!(count, 4);
        assert_eq!(
            released,
            vec![
                GpuResource::VertexArray(glow::NativeVertexArray(id(4))),
                GpuResource::Buffer(glow::NativeBuffer(id(3))),
                GpuResource::Program(glow::NativeProgram(id(2))),
                GpuResource::Texture(glow::NativeTexture(id(1))),
            ]
        );
        assert!(stack.is_empty());
    }

    #[test]
    fn test_second_release_is_noop() {
        let mut stack = ReleaseStack::new();
        stack.push("texture");
        stack.push("program");

        assert_eq!(stack.release_all(|_| {}), 2);

        let mut released = Vec::new();
        assert_eq!(stack.release_all(|r| released.push(r)), 0);
        assert!(released.is_empty());
    }

    #[test]
    fn test_partial_initialization() {
        // Only the texture was created before a shader failed to compile
        let mut stack = ReleaseStack::new();
        stack.push(GpuResource::Texture(glow::NativeTexture(id(7))));
        assert_eq!(stack.len(), 1);

        let mut released = Vec::new();
        stack.release_all(|r| released.push(r));
        assert_eq!(released, vec![GpuResource::Texture(glow::NativeTexture(id(7)))]);
    }

    #[test]
    fn test_empty_stack() {
        let mut stack: ReleaseStack<GpuResource> = ReleaseStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.release_all(|_| panic!("nothing to release")), 0);
    }
}
