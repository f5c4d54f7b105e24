//! GPU-facing model layer: device/texture collaborator traits, per-mesh
//! buffer lifecycle, and the model aggregate.

pub mod device;
pub mod gpu_mesh;
pub mod model;
pub mod texture;

pub use device::{BufferHandle, Device, DeviceError, PrimitiveTopology};
pub use gpu_mesh::GpuMesh;
pub use model::Model;
pub use texture::{Texture, TextureHandle};
