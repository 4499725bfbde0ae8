use nalgebra::{Point2, Vector3};

const EPSILON: f32 = 1e-5;

/// Twice the signed area of `(a, b, p)`. Positive when `p` lies to the left of
/// `a -> b` in a y-up frame.
#[inline(always)]
pub fn edge_function(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Barycentric weights of `p` in triangle `(v0, v1, v2)`, or `None` for a
/// degenerate triangle. `x` weighs `v0`, `y` weighs `v1`, `z` weighs `v2`.
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    let area = edge_function(v0, v1, v2);
    if area.abs() < EPSILON {
        return None;
    }

    let w0 = edge_function(v1, v2, p) / area;
    let w1 = edge_function(v2, v0, p) / area;
    Some(Vector3::new(w0, w1, 1.0 - w0 - w1))
}

#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f32>) -> bool {
    bary.x >= -EPSILON && bary.y >= -EPSILON && bary.z >= -EPSILON
}

/// Reweights screen-space barycentrics by `1/w` so attributes interpolate
/// linearly in world space. `None` when the weights collapse.
pub fn perspective_correct_barycentric(bary: Vector3<f32>, w: [f32; 3]) -> Option<Vector3<f32>> {
    let inv = w.map(|wi| if wi.abs() > EPSILON { 1.0 / wi } else { 1.0 });
    let weighted = Vector3::new(bary.x * inv[0], bary.y * inv[1], bary.z * inv[2]);

    let sum = weighted.x + weighted.y + weighted.z;
    if sum.abs() < EPSILON {
        return None;
    }
    Some(weighted / sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertices_get_unit_weights() {
        let (a, b, c) = (
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        );
        let bary = barycentric_coordinates(b, a, b, c).unwrap();
        assert_relative_eq!(bary, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        let centroid = Point2::new(4.0 / 3.0, 4.0 / 3.0);
        let bary = barycentric_coordinates(centroid, a, b, c).unwrap();
        assert!(is_inside_triangle(bary));
        assert_relative_eq!(bary.x, 1.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn degenerate_triangle_has_no_coordinates() {
        let p = Point2::new(1.0, 1.0);
        assert!(barycentric_coordinates(p, p, p, Point2::new(2.0, 2.0)).is_none());
    }

    #[test]
    fn equal_w_leaves_weights_unchanged() {
        let bary = Vector3::new(0.2, 0.3, 0.5);
        let corrected = perspective_correct_barycentric(bary, [2.0, 2.0, 2.0]).unwrap();
        assert_relative_eq!(corrected, bary, epsilon = 1e-6);
    }
}
