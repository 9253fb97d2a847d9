#![forbid(unsafe_code)]

pub mod error;
pub mod extract;
pub mod inlier_filter;
pub mod palette;
pub mod plane;
pub mod predicates;
pub mod ransac_plane;
pub mod sampling;

pub use error::{SegmentationError, SegmentationResult};
pub use extract::{
    extract_planes, extract_planes_seeded, ExtractedPlane, PlaneAssignment, PlaneExtraction,
};
pub use inlier_filter::{plane_inlier_indices, remove_plane_inliers};
pub use palette::{plane_color, PALETTE};
pub use plane::{fit_plane, PlaneModel};
pub use predicates::{angle_between_normals, point_plane_distance};
pub use ransac_plane::{
    check_normals, estimate_plane, ransac_plane, ransac_plane_seeded, PlaneFit, RansacParams,
};
pub use sampling::{reservoir_sample, sample_three, PLANE_SAMPLE_SIZE};
