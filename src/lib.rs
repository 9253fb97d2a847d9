//! Dominant plane extraction from unordered point clouds.
//!
//! Re-exports the workspace crates:
//! - [`cloud`]: the structure-of-arrays [`PointCloud`]
//! - [`segmentation`]: RANSAC plane estimation and multi-plane extraction
//! - [`io`]: OBJ and PLY readers and writers

pub use planeseg_core as cloud;
pub use planeseg_io as io;
pub use planeseg_segmentation as segmentation;

pub use planeseg_core::PointCloud;
pub use planeseg_io::{read_cloud, write_cloud};
pub use planeseg_segmentation::{estimate_plane, extract_planes, PlaneExtraction, RansacParams};
