//! MTL material parser supporting `newmtl`, `Ka`, `Kd`, `Ks`, `Ns` and
//! `#` comments. Ambient and diffuse carry four components (rgba), as
//! written by the asset pipeline this loader targets.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use corelib::{LoadError, LoadResult};

use crate::obj::parse_f32;

/// Surface properties of one `newmtl` block. Fields a block never sets
/// stay zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Material {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 3],
    pub specular_power: f32,
}

/// Name-keyed material lookup, built once per model and read-only after.
pub type MaterialTable = HashMap<String, Material>;

/// Parse an MTL file from a path.
pub fn parse_mtl_file(path: impl AsRef<Path>) -> LoadResult<MaterialTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    log::info!("Parsing MTL {}", path.display());
    parse_mtl_reader(BufReader::new(file))
}

/// Parse MTL text from a [`BufRead`] implementation.
pub fn parse_mtl_reader<R: BufRead>(reader: R) -> LoadResult<MaterialTable> {
    parse_mtl(reader)
}

/// Convenience helper to parse an MTL string literal.
pub fn parse_mtl_str(contents: &str) -> LoadResult<MaterialTable> {
    parse_mtl(io::Cursor::new(contents))
}

fn parse_mtl<R: BufRead>(reader: R) -> Result<MaterialTable, LoadError> {
    let mut table = MaterialTable::new();
    let mut current: Option<(String, Material)> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            LoadError::Malformed(format!("line {}: read failed: {e}", line_no + 1))
        })?;
        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else { continue };
        if tag.starts_with('#') {
            continue;
        }

        match tag {
            "newmtl" => {
                let name = parts.next().ok_or_else(|| {
                    LoadError::Malformed(format!("line {}: missing material name", line_no + 1))
                })?;
                // One table insert per finished block.
                if let Some((done, material)) = current.take() {
                    table.insert(done, material);
                }
                current = Some((name.to_owned(), Material::default()));
            }
            "Ka" => {
                if let Some((_, material)) = &mut current {
                    material.ambient = parse_floats(&mut parts, line_no, "Ka")?;
                }
            }
            "Kd" => {
                if let Some((_, material)) = &mut current {
                    material.diffuse = parse_floats(&mut parts, line_no, "Kd")?;
                }
            }
            "Ks" => {
                if let Some((_, material)) = &mut current {
                    material.specular = parse_floats(&mut parts, line_no, "Ks")?;
                }
            }
            "Ns" => {
                if let Some((_, material)) = &mut current {
                    material.specular_power = parse_f32(parts.next(), line_no, "Ns value")?;
                }
            }
            _ => {
                // Unknown statement (map_Kd, illum, d, ...): skip the line.
            }
        }
    }

    if let Some((name, material)) = current.take() {
        table.insert(name, material);
    }
    log::debug!("MTL parsed: {} materials", table.len());
    Ok(table)
}

fn parse_floats<'a, const N: usize>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
    what: &str,
) -> LoadResult<[f32; N]> {
    let mut values = [0.0f32; N];
    for value in &mut values {
        *value = parse_f32(parts.next(), line_no, what)?;
    }
    Ok(values)
}
