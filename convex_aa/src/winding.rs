// Copyright 2026 the Convex AA Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Winding direction and convexity queries over path points.

use crate::kurbo::{BezPath, PathEl, Point};
use crate::math::Side;
use smallvec::SmallVec;

/// Winding direction of a closed boundary in y-down device coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise point order.
    Cw,
    /// Counterclockwise point order.
    Ccw,
}

impl Direction {
    /// The side a travel-direction vector is rotated toward so that the
    /// resulting normal points out of the boundary.
    pub fn outward_side(self) -> Side {
        match self {
            Self::Ccw => Side::Right,
            Self::Cw => Side::Left,
        }
    }
}

/// Winding direction of a closed point loop, from its shoelace sum.
///
/// A positive sum is clockwise in y-down device coordinates. Returns `None`
/// when the loop encloses no signed area at all.
pub fn loop_direction(points: &[Point]) -> Option<Direction> {
    let mut area = 0.0;
    for i in 0..points.len() {
        let pi = points[i];
        let pj = points[(i + 1) % points.len()];
        area += pi.x * pj.y - pj.x * pi.y;
    }
    if area > 0.0 {
        Some(Direction::Cw)
    } else if area < 0.0 {
        Some(Direction::Ccw)
    } else {
        None
    }
}

// Cross products this small count as straight rather than as a turn.
const TURN_EPSILON: f64 = 1e-12;

/// Whether `path` is convex.
///
/// The test runs over the closed control polygon: a single contour whose
/// corners all turn the same way is accepted. A Bézier curve lies inside the
/// hull of its control points, so a convex control polygon implies a convex
/// path; the test is conservative for curves that would remain convex with a
/// wilder control cage.
pub fn is_convex(path: &BezPath) -> bool {
    let mut points: SmallVec<[Point; 16]> = SmallVec::new();
    let push = |points: &mut SmallVec<[Point; 16]>, p: Point| {
        if points.last() != Some(&p) {
            points.push(p);
        }
    };
    let mut contours = 0;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                contours += 1;
                push(&mut points, p);
            }
            PathEl::LineTo(p) => push(&mut points, p),
            PathEl::QuadTo(p1, p2) => {
                push(&mut points, p1);
                push(&mut points, p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                push(&mut points, p1);
                push(&mut points, p2);
                push(&mut points, p3);
            }
            PathEl::ClosePath => {}
        }
    }
    if contours > 1 {
        return false;
    }
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    // Points and single edges are trivially convex.
    if points.len() < 3 {
        return true;
    }

    let count = points.len();
    let mut sign = 0.0;
    for i in 0..count {
        let p0 = points[i];
        let p1 = points[(i + 1) % count];
        let p2 = points[(i + 2) % count];
        let cross = (p1 - p0).cross(p2 - p1);
        if cross.abs() < TURN_EPSILON {
            continue;
        }
        if sign != 0.0 && cross.signum() != sign {
            return false;
        }
        sign = cross.signum();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{is_convex, loop_direction, Direction};
    use crate::kurbo::{BezPath, Point};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn square_directions() {
        // Down, right, up in y-down coordinates: counterclockwise on screen.
        let ccw = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert_eq!(loop_direction(&ccw), Some(Direction::Ccw));
        let cw: Vec<_> = ccw.into_iter().rev().collect();
        assert_eq!(loop_direction(&cw), Some(Direction::Cw));
    }

    #[test]
    fn zero_area_loop_has_no_direction() {
        let flat = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(loop_direction(&flat), None);
    }

    #[test]
    fn convex_shapes_accepted() {
        let mut triangle = BezPath::new();
        triangle.move_to((0.0, 0.0));
        triangle.line_to((4.0, 0.0));
        triangle.line_to((2.0, 3.0));
        triangle.close_path();
        assert!(is_convex(&triangle));

        let mut rounded = BezPath::new();
        rounded.move_to((1.0, 0.0));
        rounded.quad_to((1.0, 1.0), (0.0, 1.0));
        rounded.quad_to((-1.0, 1.0), (-1.0, 0.0));
        rounded.quad_to((-1.0, -1.0), (0.0, -1.0));
        rounded.quad_to((1.0, -1.0), (1.0, 0.0));
        rounded.close_path();
        assert!(is_convex(&rounded));
    }

    #[test]
    fn concave_shape_rejected() {
        let mut arrow = BezPath::new();
        arrow.move_to((0.0, 0.0));
        arrow.line_to((4.0, 0.0));
        arrow.line_to((2.0, 1.0));
        arrow.line_to((4.0, 4.0));
        arrow.close_path();
        assert!(!is_convex(&arrow));
    }

    #[test]
    fn multiple_contours_rejected() {
        let mut two = BezPath::new();
        two.move_to((0.0, 0.0));
        two.line_to((1.0, 0.0));
        two.line_to((0.0, 1.0));
        two.close_path();
        two.move_to((5.0, 5.0));
        two.line_to((6.0, 5.0));
        two.line_to((5.0, 6.0));
        two.close_path();
        assert!(!is_convex(&two));
    }

    #[test]
    fn collinear_runs_do_not_flip_convexity() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.line_to((2.0, 0.0));
        path.line_to((2.0, 2.0));
        path.line_to((0.0, 2.0));
        path.close_path();
        assert!(is_convex(&path));
    }
}
