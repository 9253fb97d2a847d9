use nalgebra::Vector3;

#[inline]
pub(crate) fn vec3(p: &[f32; 3]) -> Vector3<f32> {
    Vector3::new(p[0], p[1], p[2])
}

/// Absolute perpendicular distance from `point` to the plane through `anchor`
/// with normal `normal`.
///
/// The normal does not need to be unit length. A zero-length normal yields
/// NaN, which compares false against any threshold, so a degenerate plane
/// simply matches nothing.
#[inline]
pub fn point_plane_distance(point: &[f32; 3], anchor: &[f32; 3], normal: &[f32; 3]) -> f32 {
    let n = vec3(normal);
    let unit = n / n.norm();
    (vec3(point) - vec3(anchor)).dot(&unit).abs()
}

/// Angle in radians, in `[0, pi]`, between two directions.
///
/// Orientation matters: opposite normals are `pi` apart.
#[inline]
pub fn angle_between_normals(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    angle_between_unit_normals(&unit_vector(a), &unit_vector(b))
}

/// [`angle_between_normals`] for directions that are already unit length.
#[inline]
pub(crate) fn angle_between_unit_normals(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    // Rounding can push |cos| slightly past 1, which acos rejects.
    vec3(a).dot(&vec3(b)).clamp(-1.0, 1.0).acos()
}

/// `v` scaled to unit length. A zero vector becomes NaN.
#[inline]
pub(crate) fn unit_vector(v: &[f32; 3]) -> [f32; 3] {
    let v = vec3(v);
    let u = v / v.norm();
    [u.x, u.y, u.z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn unit_angle_matches_general_angle() {
        let a = [3.0, -1.0, 2.0];
        let b = [-0.5, 4.0, 1.0];
        assert_relative_eq!(
            angle_between_unit_normals(&unit_vector(&a), &unit_vector(&b)),
            angle_between_normals(&a, &b),
            epsilon = 1e-6
        );
        assert!(unit_vector(&[0.0, 0.0, 0.0]).iter().all(|c| c.is_nan()));
    }

    #[test]
    fn distance_to_axis_plane() {
        let anchor = [0.0, 0.0, 0.0];
        let normal = [0.0, 0.0, 2.0];
        assert_relative_eq!(point_plane_distance(&[1.0, 2.0, 3.0], &anchor, &normal), 3.0);
        assert_relative_eq!(point_plane_distance(&[0.0, 0.0, -5.0], &anchor, &normal), 5.0);
        assert_relative_eq!(point_plane_distance(&[7.0, -3.0, 0.0], &anchor, &normal), 0.0);
    }

    #[test]
    fn distance_to_tilted_plane() {
        // x + y + z = 3
        let anchor = [1.0, 1.0, 1.0];
        let normal = [1.0, 1.0, 1.0];
        assert!(point_plane_distance(&[3.0, 0.0, 0.0], &anchor, &normal) < 1e-6);
        assert_relative_eq!(
            point_plane_distance(&[0.0, 0.0, 0.0], &anchor, &normal),
            3.0f32.sqrt(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn zero_normal_distance_is_nan() {
        let d = point_plane_distance(&[1.0, 1.0, 1.0], &[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0]);
        assert!(d.is_nan());
        assert_eq!(d.partial_cmp(&0.1), None);
    }

    #[test]
    fn angle_same_and_opposite() {
        let n = [0.3, -1.2, 4.0];
        let neg = [-0.3, 1.2, -4.0];
        assert!(angle_between_normals(&n, &n) < 1e-3);
        assert_relative_eq!(angle_between_normals(&n, &neg), PI, epsilon = 1e-3);
    }

    #[test]
    fn angle_perpendicular() {
        assert_relative_eq!(
            angle_between_normals(&[1.0, 0.0, 0.0], &[0.0, 5.0, 0.0]),
            PI / 2.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn angle_ignores_magnitude() {
        let a = angle_between_normals(&[1.0, 1.0, 0.0], &[1.0, 0.0, 0.0]);
        let b = angle_between_normals(&[10.0, 10.0, 0.0], &[0.001, 0.0, 0.0]);
        assert_relative_eq!(a, b, epsilon = 1e-5);
    }

    proptest! {
        #[test]
        fn points_spanned_in_plane_have_zero_distance(
            anchor in (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0),
            t in -5.0f32..5.0,
            s in -5.0f32..5.0,
        ) {
            // Plane z = anchor.z with u, v spanning x and y; also a tilted plane
            // with normal (1, 1, 0) spanned by (1, -1, 0) and (0, 0, 1).
            let a = [anchor.0, anchor.1, anchor.2];
            let flat = [a[0] + t, a[1] + s, a[2]];
            prop_assert!(point_plane_distance(&flat, &a, &[0.0, 0.0, 1.0]) < 1e-4);

            let tilted = [a[0] + t, a[1] - t, a[2] + s];
            prop_assert!(point_plane_distance(&tilted, &a, &[1.0, 1.0, 0.0]) < 1e-3);
        }

        #[test]
        fn angle_is_within_range(
            a in (-10.0f32..10.0, -10.0f32..10.0, 0.1f32..10.0),
            b in (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..-0.1),
        ) {
            let angle = angle_between_normals(&[a.0, a.1, a.2], &[b.0, b.1, b.2]);
            prop_assert!(angle >= 0.0);
            prop_assert!(angle <= PI);
        }
    }
}
