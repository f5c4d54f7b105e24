//! Texture collaborator boundary. The actual loading/upload subsystem
//! lives outside this crate; a model only drives the lifecycle.

use std::path::Path;

use corelib::LoadResult;

/// Opaque id for a shader-visible texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Texture collaborator owned by a model.
pub trait Texture {
    /// Load the file at `path` and create the shader-visible texture.
    fn initialize(&mut self, path: &Path) -> LoadResult<()>;

    /// Handle for shader binding, if initialized.
    fn handle(&self) -> Option<TextureHandle>;

    /// Release the texture. Safe to call repeatedly.
    fn shutdown(&mut self);
}
