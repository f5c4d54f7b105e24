//! Model aggregate: owns sub-meshes, the material table, and an optional
//! texture; orchestrates the load → build → upload pipeline.

use std::path::Path;

use asset::{
    mesh,
    mtl::{self, Material, MaterialTable},
    obj,
};
use corelib::{LoadError, LoadResult, Vec3};

use crate::device::Device;
use crate::gpu_mesh::GpuMesh;
use crate::texture::{Texture, TextureHandle};

/// Directory the material library named by an OBJ's `mtllib` statement is
/// resolved against.
const MATERIAL_DIR: &str = "data/model";

/// A loaded model: one GPU mesh per OBJ group, the material lookup table,
/// and at most one texture. Sub-meshes keep their OBJ group order.
#[derive(Default)]
pub struct Model {
    meshes: Vec<GpuMesh>,
    materials: MaterialTable,
    texture: Option<Box<dyn Texture>>,
    dimensions: Vec3,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full load pipeline: parse the OBJ, build one sub-mesh per
    /// group, load the material table from `data/model/<mtllib>`,
    /// initialize the optional texture, then upload every sub-mesh.
    ///
    /// The first failing stage aborts and is returned as-is. State built
    /// before the failure is not rolled back here; call [`Model::shutdown`]
    /// to release it.
    pub fn initialize(
        &mut self,
        device: &dyn Device,
        mesh_path: impl AsRef<Path>,
        texture: Option<(Box<dyn Texture>, &Path)>,
    ) -> LoadResult<()> {
        let mesh_path = mesh_path.as_ref();
        let raw = obj::parse_obj_file(mesh_path)?;
        self.dimensions = raw.dimensions;

        for group in &raw.groups {
            self.meshes.push(GpuMesh::new(mesh::build_group(group, &raw)?));
        }
        if self.meshes.is_empty() {
            return Err(LoadError::EmptyMeshData(
                mesh_path.display().to_string(),
            ));
        }

        self.materials = mtl::parse_mtl_file(Path::new(MATERIAL_DIR).join(&raw.mtllib))?;

        if let Some((mut texture, texture_path)) = texture {
            texture.initialize(texture_path)?;
            self.texture = Some(texture);
        }

        for gpu_mesh in &mut self.meshes {
            gpu_mesh.initialize_buffers(device)?;
        }

        log::info!(
            "Model {} ready: {} meshes, {} materials, {} indices, extents {:?}",
            mesh_path.display(),
            self.meshes.len(),
            self.materials.len(),
            self.index_count(),
            self.dimensions.to_array()
        );
        Ok(())
    }

    /// Bind every sub-mesh in OBJ group order. Draw-call ordering across
    /// materials or depth is not arranged here; callers sort externally
    /// if they need to. A no-op before initialize or after shutdown.
    pub fn render(&self, device: &dyn Device) {
        for gpu_mesh in &self.meshes {
            gpu_mesh.render_buffers(device);
        }
    }

    /// Total index count over all sub-meshes; 0 when empty or shut down.
    pub fn index_count(&self) -> usize {
        self.meshes.iter().map(GpuMesh::index_count).sum()
    }

    /// Shader-visible handle of the loaded texture, if any.
    pub fn texture_handle(&self) -> Option<TextureHandle> {
        self.texture.as_ref().and_then(|t| t.handle())
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Bounding extents (width, height, depth) computed during parse.
    pub fn dimensions(&self) -> Vec3 {
        self.dimensions
    }

    pub fn meshes(&self) -> &[GpuMesh] {
        &self.meshes
    }

    /// Release the texture, then every sub-mesh's GPU buffers and the
    /// sub-meshes themselves. Idempotent; the model can be initialized
    /// again afterwards.
    pub fn shutdown(&mut self, device: &dyn Device) {
        if let Some(mut texture) = self.texture.take() {
            texture.shutdown();
        }
        for mut gpu_mesh in self.meshes.drain(..) {
            gpu_mesh.shutdown_buffers(device);
        }
        self.materials.clear();
        self.dimensions = Vec3::ZERO;
    }
}
