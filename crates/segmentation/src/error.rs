//! Error types for plane segmentation.

use thiserror::Error;

/// Errors that can occur while estimating or extracting planes.
///
/// Degenerate samples and rounds that find no plane are not errors; they show
/// up as zero inlier counts and `None` fits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentationError {
    /// Normal gating was requested but the cloud carries no normals.
    #[error("normal gating requested but the cloud has no normals")]
    MissingNormals,

    /// Normal gating was requested but normals are not one per point.
    #[error("normals length ({normals_len}) does not match cloud length ({cloud_len})")]
    NormalsMismatch {
        /// Number of normals in the cloud.
        normals_len: usize,
        /// Number of points in the cloud.
        cloud_len: usize,
    },

    /// A parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for segmentation operations.
pub type SegmentationResult<T> = Result<T, SegmentationError>;
