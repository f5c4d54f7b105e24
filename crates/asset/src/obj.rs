//! OBJ geometry parser supporting the subset used by the model pipeline:
//! `mtllib`, `v`, `vt`, `vn`, `g <name>` + `usemtl <material>`, `f`.
//!
//! Input is right-handed; output is converted to the left-handed
//! convention: z is negated for positions and normals, and the v texture
//! coordinate is flipped (v' = 1 - v).

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use corelib::{LoadError, LoadResult, Vec2, Vec3, vec2, vec3};

/// Raw 1-based indices of one face corner (`v/vt/vn`).
/// `None` marks an absent or unparsable field; OBJ indices start at 1,
/// so no sentinel value is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceCorner {
    pub position: Option<u32>,
    pub texcoord: Option<u32>,
    pub normal: Option<u32>,
}

/// Polygon corners, stored in reverse of file order. The reversal keeps
/// the winding front-facing after the z-flip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub corners: Vec<FaceCorner>,
}

/// One `g <name>` / `usemtl <material>` block and its faces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    pub name: String,
    pub material: String,
    pub faces: Vec<Face>,
}

/// Everything read from one OBJ file, before mesh building.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawObjData {
    pub mtllib: String,
    pub positions: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub groups: Vec<Group>,
    /// Axis-aligned bounding extents (width, height, depth) over all
    /// positions, after the z-flip. Zero when the file has no positions.
    pub dimensions: Vec3,
}

/// Parse an OBJ file from a path.
pub fn parse_obj_file(path: impl AsRef<Path>) -> LoadResult<RawObjData> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    log::info!("Parsing OBJ {}", path.display());
    parse_obj_reader(BufReader::new(file))
}

/// Parse OBJ text from a [`BufRead`] implementation.
pub fn parse_obj_reader<R: BufRead>(reader: R) -> LoadResult<RawObjData> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn parse_obj_str(contents: &str) -> LoadResult<RawObjData> {
    parse_obj(io::Cursor::new(contents))
}

/// Group sub-parser state. `Opened` means `g <name>` was seen and the
/// next directive decides whether the group is real (`usemtl`) or
/// silently dropped (anything else).
#[derive(Debug, Default)]
enum GroupState {
    #[default]
    Seeking,
    Opened(String),
    InGroup(Group),
}

fn parse_obj<R: BufRead>(reader: R) -> Result<RawObjData, LoadError> {
    let mut data = RawObjData::default();
    let mut bounds: Option<(Vec3, Vec3)> = None;
    let mut state = GroupState::Seeking;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            LoadError::Malformed(format!("line {}: read failed: {e}", line_no + 1))
        })?;
        let mut parts = line.split_whitespace();
        let tag = parts.next();

        // A face block ends at the first line that does not start with
        // `f`; the finished group is recorded and the line is then
        // processed as a regular directive.
        if tag != Some("f") && matches!(state, GroupState::InGroup(_)) {
            if let GroupState::InGroup(group) = std::mem::take(&mut state) {
                data.groups.push(group);
            }
        }

        let Some(tag) = tag else { continue };
        if tag.starts_with('#') {
            continue;
        }

        // A pending `g` is only promoted by an immediately following
        // `usemtl`; any other directive discards it.
        if tag != "usemtl" && matches!(state, GroupState::Opened(_)) {
            state = GroupState::Seeking;
        }

        match tag {
            "mtllib" => {
                data.mtllib = parse_name(parts.next(), line_no, "material library")?;
            }
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                let position = vec3(x, y, -z);
                bounds = Some(match bounds {
                    None => (position, position),
                    Some((min, max)) => (min.min(position), max.max(position)),
                });
                data.positions.push(position);
            }
            "vt" => {
                let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                let v = parse_f32(parts.next(), line_no, "v coordinate")?;
                data.texcoords.push(vec2(u, 1.0 - v));
            }
            "vn" => {
                let x = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let y = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let z = parse_f32(parts.next(), line_no, "nz coordinate")?;
                data.normals.push(vec3(x, y, -z));
            }
            "g" => {
                let name = parse_name(parts.next(), line_no, "group name")?;
                match parts.next() {
                    // One-line form: `g <name> usemtl <material>`.
                    Some("usemtl") => {
                        let material = parse_name(parts.next(), line_no, "material name")?;
                        state = GroupState::InGroup(Group {
                            name,
                            material,
                            faces: Vec::new(),
                        });
                    }
                    // `g` followed by something else: not a group block.
                    Some(_) => {}
                    None => state = GroupState::Opened(name),
                }
            }
            "usemtl" => {
                // Only meaningful right after `g <name>`; stray `usemtl`
                // lines are ignored.
                if let GroupState::Opened(name) = std::mem::take(&mut state) {
                    let material = parse_name(parts.next(), line_no, "material name")?;
                    state = GroupState::InGroup(Group {
                        name,
                        material,
                        faces: Vec::new(),
                    });
                }
            }
            "f" => {
                // Faces outside a group block are dropped.
                if let GroupState::InGroup(group) = &mut state {
                    group.faces.push(parse_face(parts));
                }
            }
            _ => {
                // Unsupported directive (o/s/vp/...): skip the line.
            }
        }
    }

    if let GroupState::InGroup(group) = state {
        data.groups.push(group);
    }

    data.dimensions = match bounds {
        Some((min, max)) => max - min,
        None => Vec3::ZERO,
    };
    log::debug!(
        "OBJ parsed: {} positions, {} texcoords, {} normals, {} groups",
        data.positions.len(),
        data.texcoords.len(),
        data.normals.len(),
        data.groups.len()
    );
    Ok(data)
}

/// Parse one `f` line. Corner tokens are collected left to right and then
/// reversed so the triangle winding stays front-facing in the left-handed
/// output space.
fn parse_face<'a>(parts: impl Iterator<Item = &'a str>) -> Face {
    let mut corners: Vec<FaceCorner> = parts.map(parse_corner).collect();
    corners.reverse();
    Face { corners }
}

/// Split one `v/vt/vn` token into up to three optional 1-based indices.
/// Empty or non-numeric fields become `None`.
fn parse_corner(token: &str) -> FaceCorner {
    let mut fields = token.splitn(3, '/');
    FaceCorner {
        position: parse_index(fields.next()),
        texcoord: parse_index(fields.next()),
        normal: parse_index(fields.next()),
    }
}

fn parse_index(field: Option<&str>) -> Option<u32> {
    field
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|&i| i != 0)
}

pub(crate) fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> LoadResult<f32> {
    let token = value.ok_or_else(|| {
        LoadError::Malformed(format!("line {}: missing {what}", line_no + 1))
    })?;
    token.parse::<f32>().map_err(|_| {
        LoadError::Malformed(format!("line {}: invalid {what}: '{token}'", line_no + 1))
    })
}

fn parse_name(value: Option<&str>, line_no: usize, what: &str) -> LoadResult<String> {
    value.map(str::to_owned).ok_or_else(|| {
        LoadError::Malformed(format!("line {}: missing {what}", line_no + 1))
    })
}
