// Copyright 2026 the Convex AA Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interior fan point and outward vectors for a segment loop.

use crate::kurbo::{Point, Vec2};
use crate::math::orthogonal;
use crate::mesh::MeshCounts;
use crate::segment::Segment;
use crate::winding::Direction;

// Loop areas below this are treated as zero when placing the fan point.
const NEARLY_ZERO: f64 = 1.0 / 4096.0;

/// Signed-area-weighted centroid of the loop's endpoints, falling back to
/// their plain average when the loop encloses almost no area.
pub(crate) fn center_of_mass(segments: &[Segment]) -> Point {
    let mut area = 0.0;
    let mut center = Vec2::ZERO;
    let count = segments.len();
    for i in 0..count {
        let pi = segments[i].end_point();
        let pj = segments[(i + 1) % count].end_point();
        let t = pi.x * pj.y - pj.x * pi.y;
        area += t;
        center += Vec2::new((pi.x + pj.x) * t, (pi.y + pj.y) * t);
    }
    let c = if area.abs() < NEARLY_ZERO {
        let mut avg = Vec2::ZERO;
        for segment in segments {
            avg += segment.end_point().to_vec2();
        }
        (avg / count as f64).to_point()
    } else {
        (center / (3.0 * area)).to_point()
    };
    debug_assert!(!c.x.is_nan() && !c.y.is_nan(), "fan point is NaN");
    c
}

/// Fills in the outward normals and corner bisectors of every segment and
/// returns the fan point together with the exact mesh budget.
///
/// Runs as two passes: the first derives a unit normal per segment point
/// from the edge arriving at it, rotated outward per `dir`, and tallies the
/// per-segment body budget; the second reads only those finalized normals to
/// build the corner bisectors and tallies one wedge per corner.
pub fn compute_vectors(segments: &mut [Segment], dir: Direction) -> (Point, MeshCounts) {
    let fan_point = center_of_mass(segments);
    let side = dir.outward_side();
    let count = segments.len();
    let mut counts = MeshCounts::default();

    for a in 0..count {
        let b = (a + 1) % count;
        let mut prev = segments[a].end_point();
        for p in 0..segments[b].point_count() {
            let pt = segments[b].point(p);
            segments[b].norms[p] = orthogonal((pt - prev).normalize(), side);
            prev = pt;
        }
        counts.add_body(segments[b].shape);
    }

    for a in 0..count {
        let b = (a + 1) % count;
        let mid = (segments[b].norms[0] + segments[a].end_normal()).normalize();
        segments[b].mid = mid;
        counts.add_wedge();
    }

    (fan_point, counts)
}
