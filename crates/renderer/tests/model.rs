//! End-to-end model pipeline tests against on-disk fixtures under
//! `data/model/` (the same directory the material library is resolved
//! against) and a fake device/texture pair.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::Path;

use corelib::{LoadError, LoadResult};
use renderer::{BufferHandle, Device, DeviceError, Model, PrimitiveTopology, Texture, TextureHandle};

#[derive(Default)]
struct FakeDevice {
    next: Cell<u32>,
    live: RefCell<HashSet<u32>>,
    bind_count: Cell<u32>,
}

impl FakeDevice {
    fn live_count(&self) -> usize {
        self.live.borrow().len()
    }

    fn alloc(&self) -> Result<BufferHandle, DeviceError> {
        let id = self.next.get() + 1;
        self.next.set(id);
        self.live.borrow_mut().insert(id);
        Ok(BufferHandle(id))
    }
}

impl Device for FakeDevice {
    fn create_vertex_buffer(&self, _bytes: &[u8]) -> Result<BufferHandle, DeviceError> {
        self.alloc()
    }

    fn create_index_buffer(&self, _bytes: &[u8]) -> Result<BufferHandle, DeviceError> {
        self.alloc()
    }

    fn destroy_buffer(&self, buffer: BufferHandle) {
        assert!(
            self.live.borrow_mut().remove(&buffer.0),
            "double destroy of buffer {}",
            buffer.0
        );
    }

    fn bind_vertex_buffer(&self, _buffer: BufferHandle, _stride: u32) {
        self.bind_count.set(self.bind_count.get() + 1);
    }

    fn bind_index_buffer(&self, _buffer: BufferHandle) {
        self.bind_count.set(self.bind_count.get() + 1);
    }

    fn set_primitive_topology(&self, _topology: PrimitiveTopology) {
        self.bind_count.set(self.bind_count.get() + 1);
    }
}

#[derive(Default)]
struct FakeTexture {
    handle: Option<TextureHandle>,
}

impl Texture for FakeTexture {
    fn initialize(&mut self, _path: &Path) -> LoadResult<()> {
        self.handle = Some(TextureHandle(7));
        Ok(())
    }

    fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    fn shutdown(&mut self) {
        self.handle = None;
    }
}

#[test]
fn quad_round_trip_produces_one_mesh_and_one_material() {
    let device = FakeDevice::default();
    let mut model = Model::new();
    model
        .initialize(&device, "data/model/quad.obj", None)
        .expect("load quad fixture");

    assert_eq!(model.meshes().len(), 1);
    let mesh = &model.meshes()[0];
    assert_eq!(mesh.name(), "quad");
    assert_eq!(mesh.material(), "white");
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.index_count(), 6);
    assert_eq!(model.index_count(), 6);
    assert!(mesh.is_uploaded());

    assert_eq!(model.materials().len(), 1);
    let material = model.material("white").expect("usemtl name resolves");
    assert_eq!(material.diffuse, [0.8, 0.8, 0.8, 1.0]);
    assert_eq!(material.specular_power, 32.0);

    model.shutdown(&device);
}

#[test]
fn quad_dimensions_match_bounding_box() {
    let device = FakeDevice::default();
    let mut model = Model::new();
    model
        .initialize(&device, "data/model/quad.obj", None)
        .expect("load quad fixture");
    assert_eq!(model.dimensions().to_array(), [1.0, 1.0, 0.0]);
    model.shutdown(&device);
}

#[test]
fn fresh_model_reports_zero_indices_and_renders_nothing() {
    let device = FakeDevice::default();
    let model = Model::new();
    assert_eq!(model.index_count(), 0);
    model.render(&device);
    assert_eq!(device.bind_count.get(), 0);
}

#[test]
fn render_binds_every_mesh() {
    let device = FakeDevice::default();
    let mut model = Model::new();
    model
        .initialize(&device, "data/model/quad.obj", None)
        .expect("load quad fixture");
    model.render(&device);
    // One VB bind, one IB bind, one topology set per mesh.
    assert_eq!(device.bind_count.get(), 3);
    model.shutdown(&device);
}

#[test]
fn shutdown_is_idempotent_and_releases_everything() {
    let device = FakeDevice::default();
    let mut model = Model::new();
    model
        .initialize(&device, "data/model/quad.obj", None)
        .expect("load quad fixture");
    assert_eq!(device.live_count(), 2);

    model.shutdown(&device);
    assert_eq!(device.live_count(), 0);
    assert_eq!(model.index_count(), 0);

    // Render after shutdown is a defined no-op; shutdown again is too.
    model.render(&device);
    assert_eq!(device.bind_count.get(), 0);
    model.shutdown(&device);
    assert_eq!(device.live_count(), 0);
}

#[test]
fn texture_lifecycle_follows_the_model() {
    let device = FakeDevice::default();
    let mut model = Model::new();
    let texture: Box<dyn Texture> = Box::new(FakeTexture::default());
    model
        .initialize(
            &device,
            "data/model/quad.obj",
            Some((texture, Path::new("data/model/quad.png"))),
        )
        .expect("load quad fixture with texture");
    assert_eq!(model.texture_handle(), Some(TextureHandle(7)));

    model.shutdown(&device);
    assert_eq!(model.texture_handle(), None);
}

#[test]
fn missing_obj_file_aborts_with_not_found() {
    let device = FakeDevice::default();
    let mut model = Model::new();
    let err = model
        .initialize(&device, "data/model/absent.obj", None)
        .unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound(_)));
}

#[test]
fn missing_material_library_aborts_the_load() {
    let device = FakeDevice::default();
    let mut model = Model::new();
    let err = model
        .initialize(&device, "data/model/nomtl.obj", None)
        .unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound(_)));

    // Meshes were built before the failing stage but never uploaded;
    // shutdown cleans up whatever exists without touching the device.
    model.shutdown(&device);
    assert_eq!(device.live_count(), 0);
    assert_eq!(model.index_count(), 0);
}

#[test]
fn model_is_reusable_after_shutdown() {
    let device = FakeDevice::default();
    let mut model = Model::new();
    model
        .initialize(&device, "data/model/quad.obj", None)
        .expect("first load");
    model.shutdown(&device);

    model
        .initialize(&device, "data/model/quad.obj", None)
        .expect("second load");
    assert_eq!(model.index_count(), 6);
    assert_eq!(device.live_count(), 2);
    model.shutdown(&device);
}
