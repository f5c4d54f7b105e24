//! GPU-ready vertex data and per-group mesh building.

use bytemuck::{Pod, Zeroable};
use corelib::{LoadError, LoadResult, Vec2};

use crate::obj::{FaceCorner, Group, RawObjData};

/// GPU vertex layout: position, texcoord, normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
    pub normal: [f32; 3],
}

/// Flattened vertex/index data for one group, ready for upload.
///
/// Vertices are emitted once per triangle corner with no sharing across
/// corners, so `indices` is always the running sequence 0..N-1. This
/// trades memory for a trivial upload path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubMesh {
    pub name: String,
    pub material: String,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl SubMesh {
    /// Returns `true` if both vertex and index arrays are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

// Corner emission order: a fixed fan from corner 0. Faces with more than
// 4 corners are a format restriction and fall back to the triangle case.
const TRIANGLE_ORDER: [usize; 3] = [0, 1, 2];
const QUAD_ORDER: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Build one [`SubMesh`] from a parsed group, resolving 1-based indices
/// against the shared position/texcoord/normal arrays.
pub fn build_group(group: &Group, raw: &RawObjData) -> LoadResult<SubMesh> {
    let mut mesh = SubMesh {
        name: group.name.clone(),
        material: group.material.clone(),
        ..SubMesh::default()
    };

    for face in &group.faces {
        if face.corners.len() < 3 {
            continue;
        }
        let order: &[usize] = if face.corners.len() == 4 {
            &QUAD_ORDER
        } else {
            &TRIANGLE_ORDER
        };
        for &i in order {
            let vertex = resolve_corner(face.corners[i], raw, &group.name)?;
            mesh.vertices.push(vertex);
            mesh.indices.push(mesh.indices.len() as u32);
        }
    }
    Ok(mesh)
}

fn resolve_corner(corner: FaceCorner, raw: &RawObjData, group: &str) -> LoadResult<MeshVertex> {
    let position = lookup(&raw.positions, corner.position, group, "position")?;
    // An absent texcoord slot resolves to (0,0) rather than indexing.
    let texcoord = match corner.texcoord {
        Some(_) => lookup(&raw.texcoords, corner.texcoord, group, "texcoord")?,
        None => Vec2::ZERO,
    };
    let normal = lookup(&raw.normals, corner.normal, group, "normal")?;
    Ok(MeshVertex {
        position: position.to_array(),
        texcoord: texcoord.to_array(),
        normal: normal.to_array(),
    })
}

fn lookup<T: Copy>(items: &[T], index: Option<u32>, group: &str, what: &str) -> LoadResult<T> {
    let index = index.ok_or_else(|| {
        LoadError::Malformed(format!("group '{group}': missing {what} index"))
    })?;
    items.get(index as usize - 1).copied().ok_or_else(|| {
        LoadError::Malformed(format!(
            "group '{group}': {what} index {index} out of range (1..={})",
            items.len()
        ))
    })
}
