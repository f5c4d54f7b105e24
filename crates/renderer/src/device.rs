//! Injected graphics-device capability surface.
//!
//! The mesh and model layers never reach a global device; callers pass a
//! [`Device`] into upload/bind/teardown operations, so a fake device can
//! stand in during tests.

use thiserror::Error;

/// Opaque id for a device-owned buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Draw topologies the mesh layer binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
}

/// Device-side resource allocation failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DeviceError(pub String);

/// Capabilities the mesh/model layer needs from a graphics device.
///
/// Buffer creation is fallible; bind calls mirror the underlying graphics
/// API and return nothing. All calls must happen on the thread that owns
/// the device context.
pub trait Device {
    /// Create an immutable vertex buffer holding exactly `bytes`.
    fn create_vertex_buffer(&self, bytes: &[u8]) -> Result<BufferHandle, DeviceError>;

    /// Create an immutable index buffer holding exactly `bytes`.
    fn create_index_buffer(&self, bytes: &[u8]) -> Result<BufferHandle, DeviceError>;

    /// Release a buffer previously created on this device.
    fn destroy_buffer(&self, buffer: BufferHandle);

    /// Bind `buffer` as the active vertex buffer with the given stride.
    fn bind_vertex_buffer(&self, buffer: BufferHandle, stride: u32);

    /// Bind `buffer` as the active index buffer (32-bit indices).
    fn bind_index_buffer(&self, buffer: BufferHandle);

    /// Set the topology used to interpret the bound index buffer.
    fn set_primitive_topology(&self, topology: PrimitiveTopology);
}
