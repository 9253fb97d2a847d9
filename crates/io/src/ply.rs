//! PLY point clouds (ASCII and binary little endian).

use log::debug;
use planeseg_core::{Colors, Normals, PointCloud};
use std::fs;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use crate::error::{CloudIoError, CloudIoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Ascii,
    BinaryLittleEndian,
}

/// Scalar property type as declared in the PLY header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl Scalar {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "char" | "int8" => Scalar::I8,
            "uchar" | "uint8" => Scalar::U8,
            "short" | "int16" => Scalar::I16,
            "ushort" | "uint16" => Scalar::U16,
            "int" | "int32" => Scalar::I32,
            "uint" | "uint32" => Scalar::U32,
            "float" | "float32" => Scalar::F32,
            "double" | "float64" => Scalar::F64,
            _ => return None,
        })
    }

    fn byte_size(self) -> usize {
        match self {
            Scalar::I8 | Scalar::U8 => 1,
            Scalar::I16 | Scalar::U16 => 2,
            Scalar::I32 | Scalar::U32 | Scalar::F32 => 4,
            Scalar::F64 => 8,
        }
    }

    /// Decodes one little-endian value; `bytes` holds exactly `byte_size`.
    fn decode_le(self, bytes: &[u8]) -> f64 {
        match self {
            Scalar::I8 => bytes[0] as i8 as f64,
            Scalar::U8 => bytes[0] as f64,
            Scalar::I16 => i16::from_le_bytes([bytes[0], bytes[1]]) as f64,
            Scalar::U16 => u16::from_le_bytes([bytes[0], bytes[1]]) as f64,
            Scalar::I32 => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
            Scalar::U32 => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
            Scalar::F32 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
            Scalar::F64 => f64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
        }
    }
}

struct Property {
    name: String,
    scalar: Scalar,
    /// Byte offset inside a binary vertex record.
    offset: usize,
}

struct PlyHeader {
    encoding: Encoding,
    vertex_count: usize,
    properties: Vec<Property>,
    /// Size of one binary vertex record.
    stride: usize,
    /// Byte offset just after the `end_header` line.
    body_offset: usize,
}

impl PlyHeader {
    fn column(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name == name)
    }

    fn columns(&self, names: [&str; 3]) -> Option<[usize; 3]> {
        Some([
            self.column(names[0])?,
            self.column(names[1])?,
            self.column(names[2])?,
        ])
    }
}

fn parse_header(data: &[u8]) -> CloudIoResult<PlyHeader> {
    let (header_len, body_offset) = find_end_header(data)
        .ok_or_else(|| CloudIoError::invalid_content("missing end_header in PLY file"))?;
    let header_text = std::str::from_utf8(&data[..header_len])
        .map_err(|_| CloudIoError::invalid_content("PLY header not valid UTF-8"))?;

    let mut lines = header_text.lines().map(str::trim);
    if lines.next() != Some("ply") {
        return Err(CloudIoError::invalid_content("file does not start with 'ply'"));
    }

    let mut encoding = None;
    let mut vertex_count = None;
    let mut properties: Vec<Property> = Vec::new();
    let mut stride = 0usize;
    let mut in_vertex = false;
    let mut element_before_vertex = false;

    for (idx, line) in lines.enumerate() {
        // Line 1 is the magic.
        let line_no = idx + 2;
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["format", "ascii", ..] => encoding = Some(Encoding::Ascii),
            ["format", "binary_little_endian", ..] => {
                encoding = Some(Encoding::BinaryLittleEndian)
            }
            ["format", other, ..] => {
                return Err(CloudIoError::parse(
                    line_no,
                    format!("unsupported PLY format: {}", other),
                ))
            }
            ["element", "vertex", count] => {
                if vertex_count.is_some() {
                    return Err(CloudIoError::parse(line_no, "duplicate vertex element"));
                }
                // Earlier elements would shift where vertex records start.
                if element_before_vertex {
                    return Err(CloudIoError::parse(
                        line_no,
                        "vertex element must come before other elements",
                    ));
                }
                vertex_count = Some(count.parse::<usize>().map_err(|e| {
                    CloudIoError::parse(line_no, format!("invalid vertex count: {}", e))
                })?);
                in_vertex = true;
            }
            ["element", ..] => {
                element_before_vertex |= vertex_count.is_none();
                in_vertex = false;
            }
            ["property", "list", ..] if in_vertex => {
                return Err(CloudIoError::parse(
                    line_no,
                    "list properties on vertices are not supported",
                ))
            }
            ["property", ty, name] if in_vertex => {
                let scalar = Scalar::from_name(ty).ok_or_else(|| {
                    CloudIoError::parse(line_no, format!("unsupported property type: {}", ty))
                })?;
                properties.push(Property {
                    name: (*name).to_string(),
                    scalar,
                    offset: stride,
                });
                stride += scalar.byte_size();
            }
            _ => {}
        }
    }

    let encoding =
        encoding.ok_or_else(|| CloudIoError::invalid_content("PLY format line missing"))?;
    let vertex_count =
        vertex_count.ok_or_else(|| CloudIoError::invalid_content("PLY has no vertex element"))?;

    Ok(PlyHeader {
        encoding,
        vertex_count,
        properties,
        stride,
        body_offset,
    })
}

/// Returns (header length, body offset), accepting `\n` or `\r\n` endings.
fn find_end_header(data: &[u8]) -> Option<(usize, usize)> {
    const MARKER: &[u8] = b"end_header";
    let start = data.windows(MARKER.len()).position(|w| w == MARKER)?;
    let mut end = start + MARKER.len();
    if data.get(end) == Some(&b'\r') {
        end += 1;
    }
    if data.get(end) == Some(&b'\n') {
        end += 1;
    }
    Some((start, end))
}

/// Reads the vertex element of a PLY file.
///
/// `x`, `y`, `z` are required; `nx`, `ny`, `nz` and `red`, `green`, `blue`
/// are picked up when all three of a group are present.
pub fn read_ply(path: impl AsRef<Path>) -> CloudIoResult<PointCloud> {
    let data = fs::read(path)?;
    let header = parse_header(&data)?;

    let xyz = header
        .columns(["x", "y", "z"])
        .ok_or_else(|| CloudIoError::invalid_content("PLY file missing required x, y, z properties"))?;
    let normal_cols = header.columns(["nx", "ny", "nz"]);
    let color_cols = header.columns(["red", "green", "blue"]);

    let n = header.vertex_count;
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n.min(1 << 20));

    match header.encoding {
        Encoding::Ascii => {
            let body = std::str::from_utf8(&data[header.body_offset..])
                .map_err(|_| CloudIoError::invalid_content("PLY body not valid UTF-8"))?;
            let header_lines = data[..header.body_offset]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();

            for (idx, line) in body.lines().enumerate() {
                if rows.len() == n {
                    break;
                }
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let line_no = header_lines + idx + 1;
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() < header.properties.len() {
                    return Err(CloudIoError::parse(
                        line_no,
                        format!(
                            "vertex line has {} fields, expected {}",
                            fields.len(),
                            header.properties.len()
                        ),
                    ));
                }
                let row = fields[..header.properties.len()]
                    .iter()
                    .map(|f| {
                        f.parse::<f64>().map_err(|e| {
                            CloudIoError::parse(line_no, format!("invalid number '{}': {}", f, e))
                        })
                    })
                    .collect::<CloudIoResult<Vec<f64>>>()?;
                rows.push(row);
            }

            if rows.len() < n {
                return Err(CloudIoError::invalid_content(format!(
                    "PLY declares {} vertices but only {} were found",
                    n,
                    rows.len()
                )));
            }
        }
        Encoding::BinaryLittleEndian => {
            let body = &data[header.body_offset..];
            let needed = n
                .checked_mul(header.stride)
                .ok_or_else(|| CloudIoError::invalid_content("PLY vertex count overflows"))?;
            if body.len() < needed {
                return Err(CloudIoError::invalid_content(format!(
                    "PLY binary body too short: need {} bytes, got {}",
                    needed,
                    body.len()
                )));
            }

            for record in body[..needed].chunks_exact(header.stride) {
                let row = header
                    .properties
                    .iter()
                    .map(|p| p.scalar.decode_le(&record[p.offset..p.offset + p.scalar.byte_size()]))
                    .collect();
                rows.push(row);
            }
        }
    }

    let column = |c: usize| -> Vec<f32> { rows.iter().map(|r| r[c] as f32).collect() };
    let byte_column =
        |c: usize| -> Vec<u8> { rows.iter().map(|r| r[c].clamp(0.0, 255.0) as u8).collect() };

    let mut cloud = PointCloud::from_xyz(column(xyz[0]), column(xyz[1]), column(xyz[2]));
    if let Some([nx, ny, nz]) = normal_cols {
        cloud.normals = Some(Normals {
            nx: column(nx),
            ny: column(ny),
            nz: column(nz),
        });
    }
    if let Some([r, g, b]) = color_cols {
        cloud.colors = Some(Colors {
            r: byte_column(r),
            g: byte_column(g),
            b: byte_column(b),
        });
    }

    debug!(
        "read PLY: {} vertices, normals: {}, colors: {}",
        cloud.len(),
        cloud.normals.is_some(),
        cloud.colors.is_some()
    );
    Ok(cloud)
}

fn write_header(w: &mut impl std::io::Write, cloud: &PointCloud, encoding: Encoding) -> std::io::Result<()> {
    w.write_all(b"ply\n")?;
    match encoding {
        Encoding::Ascii => w.write_all(b"format ascii 1.0\n")?,
        Encoding::BinaryLittleEndian => w.write_all(b"format binary_little_endian 1.0\n")?,
    }
    w.write_all(b"comment written by planeseg\n")?;
    writeln!(w, "element vertex {}", cloud.len())?;
    w.write_all(b"property float x\nproperty float y\nproperty float z\n")?;
    if cloud.normals.is_some() {
        w.write_all(b"property float nx\nproperty float ny\nproperty float nz\n")?;
    }
    if cloud.colors.is_some() {
        w.write_all(b"property uchar red\nproperty uchar green\nproperty uchar blue\n")?;
    }
    w.write_all(b"end_header\n")
}

fn check_attribute_lengths(cloud: &PointCloud) -> CloudIoResult<()> {
    if let Some(ref normals) = cloud.normals {
        if normals.len() != cloud.len() {
            return Err(CloudIoError::invalid_content(format!(
                "cannot write {} normals for {} points as PLY",
                normals.len(),
                cloud.len()
            )));
        }
    }
    if let Some(ref colors) = cloud.colors {
        if colors.len() != cloud.len() {
            return Err(CloudIoError::invalid_content(format!(
                "cannot write {} colors for {} points as PLY",
                colors.len(),
                cloud.len()
            )));
        }
    }
    Ok(())
}

/// Write a PLY file in ASCII format.
pub fn write_ply(path: impl AsRef<Path>, cloud: &PointCloud) -> CloudIoResult<()> {
    check_attribute_lengths(cloud)?;
    let mut w = BufWriter::new(fs::File::create(path)?);
    write_header(&mut w, cloud, Encoding::Ascii)?;

    for i in 0..cloud.len() {
        write!(w, "{} {} {}", cloud.x[i], cloud.y[i], cloud.z[i])?;
        if let Some(ref normals) = cloud.normals {
            write!(w, " {} {} {}", normals.nx[i], normals.ny[i], normals.nz[i])?;
        }
        if let Some(ref colors) = cloud.colors {
            write!(w, " {} {} {}", colors.r[i], colors.g[i], colors.b[i])?;
        }
        writeln!(w)?;
    }

    w.flush()?;
    Ok(())
}

/// Write a PLY file in binary_little_endian format.
pub fn write_ply_binary(path: impl AsRef<Path>, cloud: &PointCloud) -> CloudIoResult<()> {
    check_attribute_lengths(cloud)?;
    let mut w = BufWriter::new(fs::File::create(path)?);
    write_header(&mut w, cloud, Encoding::BinaryLittleEndian)?;

    for i in 0..cloud.len() {
        for v in [cloud.x[i], cloud.y[i], cloud.z[i]] {
            w.write_all(&v.to_le_bytes())?;
        }
        if let Some(ref normals) = cloud.normals {
            for v in normals.get(i) {
                w.write_all(&v.to_le_bytes())?;
            }
        }
        if let Some(ref colors) = cloud.colors {
            w.write_all(&colors.get(i))?;
        }
    }

    w.flush()?;
    Ok(())
}
