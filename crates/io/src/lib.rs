#![forbid(unsafe_code)]

//! Point cloud readers and writers.
//!
//! Supported formats:
//! - **OBJ** (Wavefront) - vertex and vertex-normal records, optional vertex colors
//! - **PLY** - ASCII and binary little endian
//!
//! [`read_cloud`] and [`write_cloud`] pick the format from the file extension.

mod error;
mod obj;
mod ply;

pub use error::{CloudIoError, CloudIoResult};
pub use obj::{read_obj, write_obj};
pub use ply::{read_ply, write_ply, write_ply_binary};

use planeseg_core::PointCloud;
use std::path::Path;

/// Supported point cloud file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudFormat {
    Obj,
    Ply,
}

impl CloudFormat {
    /// Detects the format from a file extension, case-insensitively.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }
}

fn detect_format(path: &Path) -> CloudIoResult<CloudFormat> {
    CloudFormat::from_path(path).ok_or_else(|| CloudIoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Loads a point cloud, detecting the format from the extension.
///
/// # Errors
///
/// Fails if the extension is not recognized, the file cannot be read, or its
/// content is invalid for the detected format.
pub fn read_cloud<P: AsRef<Path>>(path: P) -> CloudIoResult<PointCloud> {
    let path = path.as_ref();
    match detect_format(path)? {
        CloudFormat::Obj => read_obj(path),
        CloudFormat::Ply => read_ply(path),
    }
}

/// Saves a point cloud, detecting the format from the extension.
///
/// PLY output is binary.
pub fn write_cloud<P: AsRef<Path>>(path: P, cloud: &PointCloud) -> CloudIoResult<()> {
    let path = path.as_ref();
    match detect_format(path)? {
        CloudFormat::Obj => write_obj(path, cloud),
        CloudFormat::Ply => write_ply_binary(path, cloud),
    }
}
