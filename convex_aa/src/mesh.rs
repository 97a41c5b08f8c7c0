// Copyright 2026 the Convex AA Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle mesh emission with per-vertex coverage parameters.
//!
//! Every segment of the loop expands into a corner wedge bridging it to the
//! previous segment plus an edge body: an interior triangle fanning out from
//! the fan point and a one-unit skirt extended along the outward normals.
//! The fragment stage recovers coverage from the interpolated vertex data,
//! either from the two linear distance fields when both are positive or from
//! the implicit form u² - v of the UV channel otherwise.

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;

use crate::kurbo::Point;
use crate::math::{self, point_to_f32};
use crate::segment::{Segment, SegmentShape};

/// Sentinel for a distance field that must not constrain coverage.
///
/// Large and negative so that interpolation against any real distance in the
/// same triangle stays negative, which routes the fragment stage to the UV
/// coverage test. Consumed by a branch-free numeric comparison, hence a
/// plain value rather than an option.
pub const FAR_DISTANCE: f32 = -f32::MAX / 100.0;

/// Interleaved vertex record consumed by the quadratic edge evaluator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct QuadVertex {
    /// Device-space position.
    pub pos: [f32; 2],
    /// Position mapped into the segment's canonical curve frame.
    pub uv: [f32; 2],
    /// Signed distance to the bounding line at the segment start, or
    /// [`FAR_DISTANCE`].
    pub d0: f32,
    /// Signed distance to the bounding line at the segment end, or
    /// [`FAR_DISTANCE`].
    pub d1: f32,
}

const_assert_eq!(core::mem::size_of::<QuadVertex>(), 24);

/// Exact number of vertices and indices a segment loop expands to.
///
/// Accumulated during [`compute_vectors`](crate::fan::compute_vectors) from
/// the same segment classification the writer consumes, so the two cannot
/// disagree; [`write_mesh`] asserts the totals regardless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshCounts {
    /// Number of [`QuadVertex`] records.
    pub vertices: usize,
    /// Number of `u16` triangle-list indices.
    pub indices: usize,
}

impl MeshCounts {
    /// Adds one corner wedge: 4 vertices, 6 indices.
    pub fn add_wedge(&mut self) {
        self.vertices += 4;
        self.indices += 6;
    }

    /// Adds one segment body: 5/9 for a line, 6/12 for a quad.
    pub fn add_body(&mut self, shape: SegmentShape) {
        match shape {
            SegmentShape::Line { .. } => {
                self.vertices += 5;
                self.indices += 9;
            }
            SegmentShape::Quad { .. } => {
                self.vertices += 6;
                self.indices += 12;
            }
        }
    }
}

/// Writes the triangle mesh for a segment loop into `verts` and `idxs`.
///
/// The slices must be sized exactly to the loop's [`MeshCounts`]. Triangle
/// winding follows the outward-normal convention of the loop, and the index
/// orderings are part of the fragment evaluator's sign contract; they must
/// not be rearranged.
pub fn write_mesh(
    segments: &[Segment],
    fan_point: Point,
    verts: &mut [QuadVertex],
    idxs: &mut [u16],
) {
    debug_assert!(verts.len() <= 1 << 16, "vertex count exceeds u16 indexing");
    let mut v = 0;
    let mut i = 0;

    let count = segments.len();
    for a in 0..count {
        let sega = &segments[a];
        let segb = &segments[(a + 1) % count];
        let corner = sega.end_point();
        let base = v as u16;

        // Corner wedge: apex plus three outward offsets swept from the
        // incoming end normal over the bisector to the outgoing start normal.
        verts[v] = QuadVertex {
            pos: point_to_f32(corner),
            uv: [0.0, 0.0],
            d0: FAR_DISTANCE,
            d1: FAR_DISTANCE,
        };
        for (slot, offset) in [sega.end_normal(), segb.mid, segb.norms[0]]
            .into_iter()
            .enumerate()
        {
            verts[v + 1 + slot] = QuadVertex {
                pos: point_to_f32(corner + offset),
                uv: [0.0, -1.0],
                d0: FAR_DISTANCE,
                d1: FAR_DISTANCE,
            };
        }
        idxs[i..i + 6].copy_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
        v += 4;
        i += 6;

        let base = v as u16;
        match segb.shape {
            SegmentShape::Line { end } => {
                // The edge renders as a degenerate quad: u stays 0 and v is
                // the signed distance to the edge, scaled so coverage runs
                // from the true edge to zero at the fan point's distance.
                let edge = end - corner;
                let dist = (edge.cross(fan_point - corner) / edge.hypot()).abs();
                let norm = segb.norms[0];
                let body = [
                    (fan_point, [0.0, dist as f32]),
                    (corner, [0.0, 0.0]),
                    (end, [0.0, 0.0]),
                    (corner + norm, [0.0, -1.0]),
                    (end + norm, [0.0, -1.0]),
                ];
                for (slot, (pos, uv)) in body.into_iter().enumerate() {
                    verts[v + slot] = QuadVertex {
                        pos: point_to_f32(pos),
                        uv,
                        d0: FAR_DISTANCE,
                        d1: FAR_DISTANCE,
                    };
                }
                idxs[i..i + 9].copy_from_slice(&[
                    base,
                    base + 2,
                    base + 1,
                    base + 3,
                    base + 1,
                    base + 2,
                    base + 4,
                    base + 3,
                    base + 2,
                ]);
                v += 5;
                i += 9;
            }
            SegmentShape::Quad { ctrl, end } => {
                let q0 = corner;
                let q1 = ctrl;
                let q2 = end;
                let n0 = segb.norms[0];
                let n1 = segb.norms[1];
                let mid = (n0 + n1).normalize();
                let to_uv = math::quad_to_uv(q0, q1, q2);

                let positions = [fan_point, q0, q2, q0 + n0, q2 + n1, q1 + mid];

                let c0 = n0.dot(q0.to_vec2());
                let d0 = [
                    -n0.dot(fan_point.to_vec2()) + c0,
                    0.0,
                    -n0.dot(q2.to_vec2()) + c0,
                ];
                let c1 = n1.dot(q2.to_vec2());
                let d1 = [
                    -n1.dot(fan_point.to_vec2()) + c1,
                    -n1.dot(q0.to_vec2()) + c1,
                    0.0,
                ];

                for (slot, pos) in positions.into_iter().enumerate() {
                    let constrained = slot < 3;
                    verts[v + slot] = QuadVertex {
                        pos: point_to_f32(pos),
                        uv: point_to_f32(to_uv * pos),
                        d0: if constrained { d0[slot] as f32 } else { FAR_DISTANCE },
                        d1: if constrained { d1[slot] as f32 } else { FAR_DISTANCE },
                    };
                }
                idxs[i..i + 12].copy_from_slice(&[
                    base + 3,
                    base + 1,
                    base + 2,
                    base + 4,
                    base + 3,
                    base + 2,
                    base + 5,
                    base + 3,
                    base + 4,
                    base,
                    base + 2,
                    base + 1,
                ]);
                v += 6;
                i += 12;
            }
        }
    }

    debug_assert_eq!(v, verts.len(), "vertex budget does not match mesh");
    debug_assert_eq!(i, idxs.len(), "index budget does not match mesh");
}

#[cfg(test)]
mod tests {
    use super::{write_mesh, QuadVertex, FAR_DISTANCE};
    use crate::kurbo::{BezPath, Point};
    use crate::segment::{ConvexOutline, SegmentShape};

    fn build(path: &BezPath) -> (ConvexOutline, Vec<QuadVertex>, Vec<u16>) {
        let outline = ConvexOutline::from_path(path).unwrap();
        let mut verts = vec![QuadVertex::default(); outline.counts.vertices];
        let mut idxs = vec![0_u16; outline.counts.indices];
        write_mesh(&outline.segments, outline.fan_point, &mut verts, &mut idxs);
        (outline, verts, idxs)
    }

    fn square() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 2.0));
        path.line_to((2.0, 2.0));
        path.line_to((2.0, 0.0));
        path.close_path();
        path
    }

    fn quad_circle() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((2.0, 0.0));
        path.quad_to((2.0, -2.0), (0.0, -2.0));
        path.quad_to((-2.0, -2.0), (-2.0, 0.0));
        path.quad_to((-2.0, 2.0), (0.0, 2.0));
        path.quad_to((2.0, 2.0), (2.0, 0.0));
        path.close_path();
        path
    }

    #[test]
    fn written_counts_match_budget() {
        // The writer asserts exhaustion internally; reaching here means the
        // exact-sized buffers were filled without overrun.
        let (outline, verts, idxs) = build(&square());
        assert_eq!(verts.len(), outline.counts.vertices);
        assert_eq!(idxs.len(), outline.counts.indices);

        let (outline, verts, idxs) = build(&quad_circle());
        assert_eq!(verts.len(), outline.counts.vertices);
        assert_eq!(idxs.len(), outline.counts.indices);
    }

    #[test]
    fn indices_stay_in_range() {
        for path in [square(), quad_circle()] {
            let (outline, _verts, idxs) = build(&path);
            assert!(idxs
                .iter()
                .all(|&ix| (ix as usize) < outline.counts.vertices));
        }
    }

    #[test]
    fn wedge_vertices_carry_sentinels() {
        let (_outline, verts, _idxs) = build(&square());
        // Each segment's group starts with its wedge.
        for wedge in verts.chunks(9).map(|group| &group[..4]) {
            assert_eq!(wedge[0].uv, [0.0, 0.0]);
            for vert in &wedge[1..] {
                assert_eq!(vert.uv, [0.0, -1.0]);
            }
            for vert in wedge {
                assert_eq!(vert.d0, FAR_DISTANCE);
                assert_eq!(vert.d1, FAR_DISTANCE);
            }
        }
    }

    #[test]
    fn line_body_encodes_fan_distance_ramp() {
        let (outline, verts, _idxs) = build(&square());
        // Fan point sits at (1, 1), one unit from every edge.
        assert_eq!(outline.fan_point, Point::new(1.0, 1.0));
        for group in verts.chunks(9) {
            let body = &group[4..];
            assert_eq!(body[0].uv, [0.0, 1.0]);
            assert_eq!(body[1].uv, [0.0, 0.0]);
            assert_eq!(body[2].uv, [0.0, 0.0]);
            assert_eq!(body[3].uv, [0.0, -1.0]);
            assert_eq!(body[4].uv, [0.0, -1.0]);
        }
    }

    #[test]
    fn quad_body_distance_fields_zero_at_own_endpoints() {
        let (_outline, verts, _idxs) = build(&quad_circle());
        for group in verts.chunks(10) {
            let body = &group[4..];
            // Interior fan vertex is strictly inside both chord lines.
            assert!(body[0].d0 > 0.0);
            assert!(body[0].d1 > 0.0);
            // Each endpoint is the zero crossing of its own field.
            assert_eq!(body[1].d0, 0.0);
            assert_eq!(body[2].d1, 0.0);
            // Skirt vertices constrain nothing.
            for vert in &body[3..] {
                assert_eq!(vert.d0, FAR_DISTANCE);
                assert_eq!(vert.d1, FAR_DISTANCE);
            }
        }
    }

    #[test]
    fn quad_body_uv_lands_on_canonical_frame() {
        let (_outline, verts, _idxs) = build(&quad_circle());
        for group in verts.chunks(10) {
            let body = &group[4..];
            // q0 maps to (0, 0) and q2 to (1, 1).
            assert!(body[1].uv[0].abs() < 1e-5 && body[1].uv[1].abs() < 1e-5);
            assert!((body[2].uv[0] - 1.0).abs() < 1e-5 && (body[2].uv[1] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn wedge_offsets_extend_one_unit_outward() {
        let (_outline, verts, _idxs) = build(&square());
        for group in verts.chunks(9) {
            let apex = group[0].pos;
            for vert in &group[1..4] {
                let dx = vert.pos[0] - apex[0];
                let dy = vert.pos[1] - apex[1];
                assert!((dx * dx + dy * dy - 1.0).abs() < 1e-5);
            }
        }
    }
}
