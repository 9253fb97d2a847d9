use crate::predicates::vec3;

/// An infinite plane given by a point on it and a normal direction.
///
/// [`fit_plane`] leaves the normal un-normalized; planes handed out by the
/// estimator always carry a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneModel {
    pub anchor: [f32; 3],
    pub normal: [f32; 3],
}

impl PlaneModel {
    /// Computes the absolute distance from a point to this plane.
    /// Assumes `normal` is a unit vector.
    #[inline]
    pub fn distance_to_point(&self, point: &[f32; 3]) -> f32 {
        let n = &self.normal;
        let a = &self.anchor;
        (n[0] * (point[0] - a[0]) + n[1] * (point[1] - a[1]) + n[2] * (point[2] - a[2])).abs()
    }

    /// Returns a copy with a unit normal, or `None` when the normal has zero
    /// (or non-finite) length, as happens for collinear samples.
    pub fn normalized(&self) -> Option<PlaneModel> {
        let n = vec3(&self.normal);
        let len = n.norm();
        if !len.is_finite() || len <= f32::MIN_POSITIVE {
            return None;
        }
        let unit = n / len;
        Some(PlaneModel {
            anchor: self.anchor,
            normal: [unit.x, unit.y, unit.z],
        })
    }

    /// Offset `d` of the equivalent `n . x + d = 0` form.
    pub fn offset(&self) -> f32 {
        -vec3(&self.normal).dot(&vec3(&self.anchor))
    }
}

/// Fits the plane through three points.
///
/// The anchor is `p0` and the normal is `(p1 - p0) x (p2 - p0)`, whose length
/// is twice the triangle area. Collinear or coincident points give a zero
/// normal; that is a valid result, it just matches no points later on.
pub fn fit_plane(p0: &[f32; 3], p1: &[f32; 3], p2: &[f32; 3]) -> PlaneModel {
    let origin = vec3(p0);
    let normal = (vec3(p1) - origin).cross(&(vec3(p2) - origin));
    PlaneModel {
        anchor: *p0,
        normal: [normal.x, normal.y, normal.z],
    }
}
