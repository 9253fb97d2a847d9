use log::debug;
use planeseg_core::PointCloud;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{SegmentationError, SegmentationResult};
use crate::plane::{fit_plane, PlaneModel};
use crate::predicates::{angle_between_unit_normals, unit_vector};
use crate::sampling::{sample_three, PLANE_SAMPLE_SIZE};

/// Tunables for a single RANSAC plane estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RansacParams {
    /// Number of sample-fit-score rounds.
    pub iterations: usize,
    /// A point is an inlier when its distance to the plane is strictly below
    /// this value.
    pub distance_threshold: f32,
    /// Maximum angle in radians between a point's normal and the candidate
    /// normal. Only consulted when `use_normals` is set.
    pub angle_threshold: f32,
    pub use_normals: bool,
}

impl Default for RansacParams {
    fn default() -> Self {
        Self {
            iterations: 100,
            distance_threshold: 0.1,
            angle_threshold: 10.0,
            use_normals: false,
        }
    }
}

impl RansacParams {
    pub fn validate(&self) -> SegmentationResult<()> {
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(SegmentationError::InvalidParameter(format!(
                "distance_threshold must be finite and non-negative, got {}",
                self.distance_threshold
            )));
        }
        if self.angle_threshold.is_nan() {
            return Err(SegmentationError::InvalidParameter(
                "angle_threshold must not be NaN".to_string(),
            ));
        }
        Ok(())
    }
}

/// The winning plane of a RANSAC run and how many points supported it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneFit {
    /// Plane with a unit normal.
    pub model: PlaneModel,
    pub inlier_count: usize,
}

/// Fits a plane to the point cloud using the RANSAC algorithm.
///
/// Uses a random (non-deterministic) seed. For reproducible results, use
/// [`ransac_plane_seeded`] or [`estimate_plane`] with your own generator.
pub fn ransac_plane(
    cloud: &PointCloud,
    params: &RansacParams,
) -> SegmentationResult<Option<PlaneFit>> {
    let mut rng = StdRng::from_entropy();
    estimate_plane(cloud, params, &mut rng)
}

/// Same as [`ransac_plane`], but reproducible: samples come from a
/// `StdRng` seeded with `seed`.
pub fn ransac_plane_seeded(
    cloud: &PointCloud,
    params: &RansacParams,
    seed: u64,
) -> SegmentationResult<Option<PlaneFit>> {
    let mut rng = StdRng::seed_from_u64(seed);
    estimate_plane(cloud, params, &mut rng)
}

/// Estimates the dominant plane of `cloud`, drawing samples from `rng`.
///
/// # Algorithm
///
/// Each of `params.iterations` rounds:
///
/// 1. Draws 3 points by reservoir sampling.
/// 2. Fits the plane through them and normalizes its normal once. A
///    collinear sample has no normal and scores zero.
/// 3. Counts points closer than `distance_threshold`; with `use_normals`
///    a point must also have a normal within `angle_threshold` of the
///    candidate normal.
/// 4. Keeps the candidate if it beats the best count so far. Ties go to the
///    earlier candidate.
///
/// Returns `Ok(None)` when no round found a single inlier, e.g. for clouds of
/// fewer than 3 points, all-collinear clouds, or zero iterations.
///
/// # Errors
///
/// Fails if the parameters are invalid, or if `use_normals` is set and the
/// cloud does not carry exactly one normal per point.
pub fn estimate_plane<R: Rng + ?Sized>(
    cloud: &PointCloud,
    params: &RansacParams,
    rng: &mut R,
) -> SegmentationResult<Option<PlaneFit>> {
    params.validate()?;
    if params.use_normals {
        check_normals(cloud)?;
    }

    let n = cloud.len();
    if n < PLANE_SAMPLE_SIZE {
        debug!("cloud has {} points, too few to span a plane", n);
        return Ok(None);
    }

    // Pre-extract into contiguous arrays for cache-friendly access.
    // Point normals are scaled to unit length here, once per estimate.
    let points = cloud.to_points();
    let normals: Option<Vec<[f32; 3]>> = if params.use_normals {
        cloud
            .normals
            .as_ref()
            .map(|normals| (0..n).map(|i| unit_vector(&normals.get(i))).collect())
    } else {
        None
    };

    let mut best: Option<PlaneFit> = None;

    for iter in 0..params.iterations {
        let sample = sample_three(&points, rng);
        let candidate = match fit_plane(&sample[0], &sample[1], &sample[2]).normalized() {
            Some(model) => model,
            None => continue,
        };

        let inlier_count = count_inliers(&points, normals.as_deref(), &candidate, params);
        let best_count = best.map_or(0, |fit| fit.inlier_count);

        if inlier_count > best_count {
            debug!(
                "iteration {}: {} inliers (previous best {})",
                iter, inlier_count, best_count
            );
            best = Some(PlaneFit {
                model: candidate,
                inlier_count,
            });
        }
    }

    Ok(best)
}

/// Verifies that the cloud has exactly one normal per point.
pub fn check_normals(cloud: &PointCloud) -> SegmentationResult<()> {
    let normals = cloud
        .normals
        .as_ref()
        .ok_or(SegmentationError::MissingNormals)?;
    if !cloud.has_paired_normals() {
        return Err(SegmentationError::NormalsMismatch {
            normals_len: normals.len(),
            cloud_len: cloud.len(),
        });
    }
    Ok(())
}

#[inline]
fn count_inliers(
    points: &[[f32; 3]],
    normals: Option<&[[f32; 3]]>,
    model: &PlaneModel,
    params: &RansacParams,
) -> usize {
    let threshold = params.distance_threshold;
    match normals {
        None => points
            .iter()
            .filter(|p| model.distance_to_point(p) < threshold)
            .count(),
        Some(normals) => points
            .iter()
            .zip(normals)
            .filter(|(p, n)| {
                model.distance_to_point(p) < threshold
                    && angle_between_unit_normals(n, &model.normal) < params.angle_threshold
            })
            .count(),
    }
}
