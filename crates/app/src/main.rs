//! Entry point: run the OBJ/MTL load pipeline against a diagnostic
//! device and report model statistics.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use anyhow::Result;
use asset::texture::TextureData;
use corelib::LoadResult;
use renderer::{
    BufferHandle, Device, DeviceError, Model, PrimitiveTopology, Texture, TextureHandle,
};

/// Device stand-in: hands out monotonic ids and logs every call, so the
/// pipeline can be exercised without a GPU attached.
struct DebugDevice {
    next: Cell<u32>,
    live: Cell<u32>,
}

impl DebugDevice {
    fn new() -> Self {
        Self {
            next: Cell::new(0),
            live: Cell::new(0),
        }
    }

    fn alloc(&self, kind: &str, bytes: usize) -> Result<BufferHandle, DeviceError> {
        let id = self.next.get() + 1;
        self.next.set(id);
        self.live.set(self.live.get() + 1);
        log::debug!("create {kind} buffer #{id} ({bytes} bytes)");
        Ok(BufferHandle(id))
    }
}

impl Device for DebugDevice {
    fn create_vertex_buffer(&self, bytes: &[u8]) -> Result<BufferHandle, DeviceError> {
        self.alloc("vertex", bytes.len())
    }

    fn create_index_buffer(&self, bytes: &[u8]) -> Result<BufferHandle, DeviceError> {
        self.alloc("index", bytes.len())
    }

    fn destroy_buffer(&self, buffer: BufferHandle) {
        self.live.set(self.live.get() - 1);
        log::debug!("destroy buffer #{}", buffer.0);
    }

    fn bind_vertex_buffer(&self, buffer: BufferHandle, stride: u32) {
        log::debug!("bind vertex buffer #{} (stride {stride})", buffer.0);
    }

    fn bind_index_buffer(&self, buffer: BufferHandle) {
        log::debug!("bind index buffer #{}", buffer.0);
    }

    fn set_primitive_topology(&self, topology: PrimitiveTopology) {
        log::debug!("set topology {topology:?}");
    }
}

/// Texture collaborator that decodes pixel data on the CPU; the handle
/// is a stand-in the same way [`DebugDevice`] buffers are.
#[derive(Default)]
struct FileTexture {
    pixels: Option<TextureData>,
    handle: Option<TextureHandle>,
}

impl Texture for FileTexture {
    fn initialize(&mut self, path: &Path) -> LoadResult<()> {
        let data = TextureData::load_png(path)?;
        log::info!("Texture ready: {}x{}", data.width, data.height);
        self.pixels = Some(data);
        self.handle = Some(TextureHandle(1));
        Ok(())
    }

    fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    fn shutdown(&mut self) {
        if let Some(data) = self.pixels.take() {
            log::debug!("Released {} texture bytes", data.data.len());
        }
        self.handle = None;
    }
}

fn parse_path_arg(prefix: &str) -> Option<PathBuf> {
    std::env::args()
        .find_map(|arg| arg.strip_prefix(prefix).map(PathBuf::from))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Accept: --mesh=<path> --texture=<path>
    let mesh_path = parse_path_arg("--mesh=").unwrap_or_else(|| "data/model/cube.obj".into());
    let texture_path = parse_path_arg("--texture=");
    log::info!(
        "Loading model {} (texture: {})",
        mesh_path.display(),
        texture_path
            .as_deref()
            .map_or("none".to_string(), |p| p.display().to_string())
    );

    let device = DebugDevice::new();
    let mut model = Model::new();
    let texture = texture_path
        .as_deref()
        .map(|path| (Box::new(FileTexture::default()) as Box<dyn Texture>, path));

    if let Err(e) = model.initialize(&device, &mesh_path, texture) {
        model.shutdown(&device);
        return Err(e.into());
    }

    for mesh in model.meshes() {
        log::info!(
            "  mesh '{}' [{}]: {} vertices, {} indices",
            mesh.name(),
            mesh.material(),
            mesh.vertex_count(),
            mesh.index_count()
        );
    }
    let [width, height, depth] = model.dimensions().to_array();
    log::info!("Extents: {width} x {height} x {depth}");

    model.render(&device);
    log::info!("Drew {} indices in one pass", model.index_count());

    model.shutdown(&device);
    if device.live.get() != 0 {
        log::warn!("{} device buffers still live after shutdown", device.live.get());
    }
    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
