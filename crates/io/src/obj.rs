//! Wavefront OBJ point clouds.
//!
//! Only vertex records matter here: `v x y z [r g b]` and `vn x y z`. Faces,
//! texture coordinates, groups and materials are skipped. Vertex colors use
//! the common `[0, 1]` float extension.

use log::{debug, warn};
use planeseg_core::{Colors, Normals, PointCloud};
use std::fs;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use crate::error::{CloudIoError, CloudIoResult};

/// Reads the vertices of an OBJ file as a point cloud.
///
/// Normals are attached whenever the file has at least one `vn` record, even
/// when their count differs from the vertex count (OBJ normals are indexed by
/// faces, not paired with vertices). Check
/// [`PointCloud::has_paired_normals`] before relying on them. Colors are
/// attached only when every vertex carries one.
pub fn read_obj(path: impl AsRef<Path>) -> CloudIoResult<PointCloud> {
    let text = fs::read_to_string(path)?;

    let mut points: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut colors: Vec<[u8; 3]> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => {
                let values = parse_floats(fields, line_no)?;
                if values.len() < 3 {
                    return Err(CloudIoError::parse(
                        line_no,
                        format!("vertex has {} coordinates, expected at least 3", values.len()),
                    ));
                }
                points.push([values[0], values[1], values[2]]);
                // `v x y z w` carries a homogeneous weight, not a color.
                if values.len() >= 6 {
                    colors.push([
                        unit_to_byte(values[3]),
                        unit_to_byte(values[4]),
                        unit_to_byte(values[5]),
                    ]);
                }
            }
            Some("vn") => {
                let values = parse_floats(fields, line_no)?;
                if values.len() != 3 {
                    return Err(CloudIoError::parse(
                        line_no,
                        format!("normal has {} components, expected 3", values.len()),
                    ));
                }
                normals.push([values[0], values[1], values[2]]);
            }
            _ => {}
        }
    }

    debug!(
        "read OBJ: {} vertices, {} normals, {} colors",
        points.len(),
        normals.len(),
        colors.len()
    );

    let mut cloud = PointCloud::from_points(&points);
    if !normals.is_empty() {
        if normals.len() != points.len() {
            warn!(
                "OBJ has {} normals for {} vertices; normals are not per-vertex",
                normals.len(),
                points.len()
            );
        }
        cloud.normals = Some(Normals::from_vectors(&normals));
    }
    if !colors.is_empty() && colors.len() == points.len() {
        cloud.colors = Some(Colors::from_rgb(&colors));
    }

    Ok(cloud)
}

/// Writes a point cloud as OBJ vertex records.
///
/// Colors, when present, are appended to each `v` line as floats in `[0, 1]`.
/// Normals are written as `vn` records.
pub fn write_obj(path: impl AsRef<Path>, cloud: &PointCloud) -> CloudIoResult<()> {
    let file = fs::File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "# planeseg point cloud, {} vertices", cloud.len())?;

    for i in 0..cloud.len() {
        write!(w, "v {} {} {}", cloud.x[i], cloud.y[i], cloud.z[i])?;
        if let Some(ref colors) = cloud.colors {
            let [r, g, b] = colors.get(i);
            write!(
                w,
                " {} {} {}",
                byte_to_unit(r),
                byte_to_unit(g),
                byte_to_unit(b)
            )?;
        }
        writeln!(w)?;
    }

    if let Some(ref normals) = cloud.normals {
        for i in 0..normals.len() {
            let [nx, ny, nz] = normals.get(i);
            writeln!(w, "vn {} {} {}", nx, ny, nz)?;
        }
    }

    w.flush()?;
    Ok(())
}

fn parse_floats<'a>(
    fields: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> CloudIoResult<Vec<f32>> {
    fields
        .map(|field| {
            field.parse::<f32>().map_err(|e| {
                CloudIoError::parse(line_no, format!("invalid number '{}': {}", field, e))
            })
        })
        .collect()
}

fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn byte_to_unit(v: u8) -> f32 {
    v as f32 / 255.0
}
