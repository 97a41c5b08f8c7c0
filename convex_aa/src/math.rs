// Copyright 2026 the Convex AA Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small geometric helpers shared by the meshing pipeline.

use crate::kurbo::{Affine, Point, Vec2};

/// Which side of a travel direction a perpendicular should fall on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Rotate 90° toward the left of the direction of travel.
    Left,
    /// Rotate 90° toward the right of the direction of travel.
    Right,
}

/// Rotates `v` a quarter turn toward `side`, in y-down device coordinates.
///
/// The result has the same length as `v`.
#[inline]
pub fn orthogonal(v: Vec2, side: Side) -> Vec2 {
    match side {
        Side::Left => Vec2::new(v.y, -v.x),
        Side::Right => Vec2::new(-v.y, v.x),
    }
}

/// Converts a point to the f32 pair stored in vertex records.
#[inline]
pub fn point_to_f32(point: Point) -> [f32; 2] {
    [point.x as f32, point.y as f32]
}

// Canonical UV positions of a quadratic's control points: the curve becomes
// the zero set of u² - v.
const UV_BASIS: Affine = Affine::new([0.5, 0.0, 1.0, 1.0, 0.0, 0.0]);

const DEGENERATE_DET: f64 = 1e-12;

/// Affine map from device space into the canonical frame of the quadratic
/// Bézier with control points `p0`, `p1`, `p2`.
///
/// The map sends `p0` to (0, 0), `p1` to (1/2, 0) and `p2` to (1, 1), so a
/// fragment stage can classify a position against the curve by evaluating
/// u² - v on its image. A quadratic with collinear control points has no such
/// frame; the map then sends u to 0 and v to the signed distance from the
/// line through the two farthest-apart control points, left side positive.
/// If all three points coincide the map is the constant (100, 100), far from
/// the zero set.
pub fn quad_to_uv(p0: Point, p1: Point, p2: Point) -> Affine {
    let basis = Affine::new([
        (p1 - p0).x,
        (p1 - p0).y,
        (p2 - p0).x,
        (p2 - p0).y,
        p0.x,
        p0.y,
    ]);
    if basis.determinant().abs() > DEGENERATE_DET {
        return UV_BASIS * basis.inverse();
    }

    let pts = [p0, p1, p2];
    let mut max_dist = p0.distance_squared(p1);
    let mut max_edge = 0;
    for edge in 1..3 {
        let dist = pts[edge].distance_squared(pts[(edge + 1) % 3]);
        if dist > max_dist {
            max_dist = dist;
            max_edge = edge;
        }
    }
    if max_dist > 0.0 {
        let line = pts[(max_edge + 1) % 3] - pts[max_edge];
        let normal = orthogonal(line.normalize(), Side::Left);
        let offset = -normal.dot(pts[max_edge].to_vec2());
        Affine::new([0.0, normal.x, 0.0, normal.y, 0.0, offset])
    } else {
        Affine::new([0.0, 0.0, 0.0, 0.0, 100.0, 100.0])
    }
}

#[cfg(test)]
mod tests {
    use super::{orthogonal, quad_to_uv, Side};
    use crate::kurbo::{Point, Vec2};

    const EPS: f64 = 1e-12;

    fn assert_near(p: Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < EPS && (p.y - y).abs() < EPS, "{p:?} != ({x}, {y})");
    }

    #[test]
    fn orthogonal_sides() {
        let v = Vec2::new(1.0, 0.0);
        assert_eq!(orthogonal(v, Side::Left), Vec2::new(0.0, -1.0));
        assert_eq!(orthogonal(v, Side::Right), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn uv_maps_control_points_to_canonical_frame() {
        let p0 = Point::new(10.0, 4.0);
        let p1 = Point::new(14.0, -2.0);
        let p2 = Point::new(21.0, 3.0);
        let m = quad_to_uv(p0, p1, p2);
        assert_near(m * p0, 0.0, 0.0);
        assert_near(m * p1, 0.5, 0.0);
        assert_near(m * p2, 1.0, 1.0);
    }

    #[test]
    fn uv_maps_curve_points_to_zero_set() {
        let p0 = Point::new(-3.0, 1.0);
        let p1 = Point::new(0.0, 5.0);
        let p2 = Point::new(4.0, 1.0);
        let m = quad_to_uv(p0, p1, p2);
        for t in [0.25, 0.5, 0.75] {
            let mt = 1.0 - t;
            let on_curve = Point::new(
                mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
                mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
            );
            let uv = m * on_curve;
            assert!((uv.x * uv.x - uv.y).abs() < EPS);
        }
    }

    #[test]
    fn uv_collinear_quad_measures_distance_to_line() {
        let m = quad_to_uv(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        );
        // u is constant zero, v is the signed distance to the x axis.
        assert_near(m * Point::new(5.0, 0.0), 0.0, 0.0);
        assert_near(m * Point::new(0.0, 1.0), 0.0, 1.0);
        assert_near(m * Point::new(3.0, -2.0), 0.0, -2.0);
    }

    #[test]
    fn uv_pointlike_quad_maps_far_from_zero_set() {
        let p = Point::new(7.0, 7.0);
        let m = quad_to_uv(p, p, p);
        assert_near(m * p, 100.0, 100.0);
        assert_near(m * Point::new(0.0, 0.0), 100.0, 100.0);
    }
}
