//! Per-submesh GPU buffer lifecycle: upload, draw-time binding, teardown.

use std::mem;

use asset::mesh::{MeshVertex, SubMesh};
use corelib::{LoadError, LoadResult};

use crate::device::{BufferHandle, Device, PrimitiveTopology};

/// One renderable sub-mesh: CPU-side data plus its GPU buffers once
/// uploaded. Buffer handles are exclusively owned and released exactly
/// once, via [`GpuMesh::shutdown_buffers`].
#[derive(Debug)]
pub struct GpuMesh {
    data: SubMesh,
    vertex_buffer: Option<BufferHandle>,
    index_buffer: Option<BufferHandle>,
}

impl GpuMesh {
    pub fn new(data: SubMesh) -> Self {
        Self {
            data,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Material this sub-mesh was tagged with (`usemtl` name).
    pub fn material(&self) -> &str {
        &self.data.material
    }

    pub fn vertex_count(&self) -> usize {
        self.data.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.data.indices.len()
    }

    pub fn is_uploaded(&self) -> bool {
        self.vertex_buffer.is_some() && self.index_buffer.is_some()
    }

    /// Upload vertex/index data into device-owned buffers.
    ///
    /// On failure no buffer stays alive: a vertex buffer created before a
    /// failing index-buffer allocation is destroyed again, so the mesh is
    /// never left half-uploaded.
    pub fn initialize_buffers(&mut self, device: &dyn Device) -> LoadResult<()> {
        if !self.data.is_valid() {
            return Err(LoadError::EmptyMeshData(self.data.name.clone()));
        }

        let vertex_buffer = device
            .create_vertex_buffer(self.data.vertex_bytes())
            .map_err(|e| LoadError::DeviceResourceCreationFailed(e.to_string()))?;
        let index_buffer = match device.create_index_buffer(self.data.index_bytes()) {
            Ok(handle) => handle,
            Err(e) => {
                device.destroy_buffer(vertex_buffer);
                return Err(LoadError::DeviceResourceCreationFailed(e.to_string()));
            }
        };

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
        log::debug!(
            "Uploaded mesh '{}': {} vertices, {} indices",
            self.data.name,
            self.data.vertices.len(),
            self.data.indices.len()
        );
        Ok(())
    }

    /// Bind this mesh's buffers and triangle-list topology to the active
    /// draw context. A mesh without live buffers binds nothing.
    pub fn render_buffers(&self, device: &dyn Device) {
        let (Some(vertex_buffer), Some(index_buffer)) = (self.vertex_buffer, self.index_buffer)
        else {
            return;
        };
        device.bind_vertex_buffer(vertex_buffer, mem::size_of::<MeshVertex>() as u32);
        device.bind_index_buffer(index_buffer);
        device.set_primitive_topology(PrimitiveTopology::TriangleList);
    }

    /// Release any held GPU buffers. Safe to call repeatedly or when
    /// nothing was ever uploaded.
    pub fn shutdown_buffers(&mut self, device: &dyn Device) {
        if let Some(index_buffer) = self.index_buffer.take() {
            device.destroy_buffer(index_buffer);
        }
        if let Some(vertex_buffer) = self.vertex_buffer.take() {
            device.destroy_buffer(vertex_buffer);
        }
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        // Teardown needs the device, which Drop cannot reach.
        if self.vertex_buffer.is_some() || self.index_buffer.is_some() {
            log::warn!(
                "GpuMesh '{}' dropped with live GPU buffers; call shutdown_buffers first",
                self.data.name
            );
        }
    }
}
