//! Asset parsing: OBJ geometry, MTL materials, mesh building, texture data.
//! Everything here is CPU-side; GPU upload lives in the renderer crate.

pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod texture;
