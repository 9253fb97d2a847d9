use log::{info, warn};
use planeseg_core::{Colors, PointCloud};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SegmentationResult;
use crate::inlier_filter::{plane_inlier_indices, remove_plane_inliers};
use crate::palette::plane_color;
use crate::ransac_plane::{check_normals, estimate_plane, PlaneFit, RansacParams};

/// Tags one point of the original cloud as lying on an extracted plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneAssignment {
    pub point_index: usize,
    pub plane_index: usize,
}

impl PlaneAssignment {
    pub fn color(&self) -> [u8; 3] {
        plane_color(self.plane_index)
    }
}

/// Outcome of one extraction round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedPlane {
    pub index: usize,
    /// `None` when RANSAC found no plane with a single inlier this round.
    pub fit: Option<PlaneFit>,
    /// Size of the working set the plane was estimated from.
    pub candidates: usize,
    /// Number of original points labeled with this plane.
    pub labeled: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaneExtraction {
    pub planes: Vec<ExtractedPlane>,
    /// Labels in round order, then original point order. A point near several
    /// planes appears once per plane.
    pub assignments: Vec<PlaneAssignment>,
}

impl PlaneExtraction {
    /// Rounds that produced a plane.
    pub fn found(&self) -> impl Iterator<Item = &ExtractedPlane> + '_ {
        self.planes.iter().filter(|p| p.fit.is_some())
    }

    /// Plane indices assigned to an original point, in round order.
    pub fn labels_for(&self, point_index: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .filter(|a| a.point_index == point_index)
            .map(|a| a.plane_index)
            .collect()
    }

    /// Builds the colored output cloud: one point per assignment, colored by
    /// its plane. Points labeled by several planes are emitted once per label;
    /// unlabeled points are left out.
    pub fn to_labeled_cloud(&self, original: &PointCloud) -> PointCloud {
        let points: Vec<[f32; 3]> = self
            .assignments
            .iter()
            .map(|a| original.point(a.point_index))
            .collect();
        let colors: Vec<[u8; 3]> = self.assignments.iter().map(PlaneAssignment::color).collect();

        PointCloud::from_points(&points).with_colors(Colors::from_rgb(&colors))
    }
}

/// Extracts up to `plane_count` planes with a deterministic seed.
pub fn extract_planes_seeded(
    original: &PointCloud,
    plane_count: usize,
    params: &RansacParams,
    seed: u64,
) -> SegmentationResult<PlaneExtraction> {
    let mut rng = StdRng::seed_from_u64(seed);
    extract_planes(original, plane_count, params, &mut rng)
}

/// Repeatedly fits the dominant plane and removes its inliers.
///
/// Each round estimates a plane on the shrinking working set, then labels
/// every point of the *original* cloud within `distance_threshold` of it
/// (distance only, no normal test). Because labeling always scans the full
/// original cloud, a point close to several planes gets several labels.
/// Between rounds the plane's inliers are dropped from the working set; the
/// last round skips that step.
///
/// A round in which RANSAC finds nothing is recorded with `fit: None`, labels
/// nothing and leaves the working set alone. Extraction stops early once the
/// working set is empty.
///
/// # Errors
///
/// Fails on invalid parameters, or when `use_normals` is set and `original`
/// lacks one normal per point.
pub fn extract_planes<R: Rng + ?Sized>(
    original: &PointCloud,
    plane_count: usize,
    params: &RansacParams,
    rng: &mut R,
) -> SegmentationResult<PlaneExtraction> {
    params.validate()?;
    if params.use_normals {
        check_normals(original)?;
    }

    let mut remaining = if params.use_normals {
        original.clone()
    } else {
        original.without_normals()
    };
    let mut extraction = PlaneExtraction::default();

    for index in 0..plane_count {
        if remaining.is_empty() {
            info!("working set exhausted after {} of {} planes", index, plane_count);
            break;
        }

        let candidates = remaining.len();
        let Some(fit) = estimate_plane(&remaining, params, rng)? else {
            warn!(
                "plane {}: no plane found among {} remaining points",
                index + 1,
                candidates
            );
            extraction.planes.push(ExtractedPlane {
                index,
                fit: None,
                candidates,
                labeled: 0,
            });
            continue;
        };

        let labeled = plane_inlier_indices(original, &fit.model, params.distance_threshold);
        info!(
            "plane {}: normal {:?}, {} inliers of {} remaining, {} points labeled",
            index + 1,
            fit.model.normal,
            fit.inlier_count,
            candidates,
            labeled.len()
        );

        extraction
            .assignments
            .extend(labeled.iter().map(|&point_index| PlaneAssignment {
                point_index,
                plane_index: index,
            }));
        extraction.planes.push(ExtractedPlane {
            index,
            fit: Some(fit),
            candidates,
            labeled: labeled.len(),
        });

        if index + 1 < plane_count {
            remaining = remove_plane_inliers(&remaining, &fit.model, params.distance_threshold);
        }
    }

    Ok(extraction)
}
