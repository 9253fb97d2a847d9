use planeseg_core::PointCloud;

use crate::plane::PlaneModel;

/// Indices of the points strictly closer than `threshold` to `plane`.
///
/// `plane` must have a unit normal. Only distance is tested; point normals
/// play no part here even when the estimate was normal-gated.
pub fn plane_inlier_indices(cloud: &PointCloud, plane: &PlaneModel, threshold: f32) -> Vec<usize> {
    cloud
        .iter_points()
        .enumerate()
        .filter(|(_, p)| plane.distance_to_point(p) < threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Returns the cloud without the points explained by `plane`.
///
/// The result is a fresh cloud holding every point at distance
/// `>= threshold` (or NaN distance), in original order. Normals and colors
/// stay paired with their points.
pub fn remove_plane_inliers(cloud: &PointCloud, plane: &PlaneModel, threshold: f32) -> PointCloud {
    if cloud.is_empty() {
        return PointCloud::new();
    }

    cloud.retain_points(|p| {
        let distance = plane.distance_to_point(&p);
        distance >= threshold || distance.is_nan()
    })
}
