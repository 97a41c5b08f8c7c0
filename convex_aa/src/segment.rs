// Copyright 2026 the Convex AA Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reduction of a convex path to a closed loop of line and quadratic
//! segments.

use crate::degenerate::DegeneracyTest;
use crate::fan;
use crate::kurbo::{BezPath, CubicBez, PathEl, Point, Vec2};
use crate::mesh::MeshCounts;
use crate::winding::{self, Direction};
use smallvec::SmallVec;
use thiserror::Error;

/// Accuracy, in device units, of the cubic to quadratic conversion.
const CUBIC_TO_QUADS_ACCURACY: f64 = 1.0;

/// Shape of one directed boundary segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentShape {
    /// Straight edge ending at `end`.
    Line {
        /// The segment's endpoint.
        end: Point,
    },
    /// Quadratic Bézier edge; the start point is the previous segment's end.
    Quad {
        /// Interior control point.
        ctrl: Point,
        /// The segment's endpoint.
        end: Point,
    },
}

/// A directed piece of a closed convex boundary.
///
/// Segments form a cyclic sequence: each one starts where the previous one
/// ends. The vectors are filled in by [`fan::compute_vectors`] after
/// extraction.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    /// The segment's geometry.
    pub shape: SegmentShape,
    /// Outward unit normal at each of the segment's points, derived from the
    /// edge arriving at that point. Only index 0 is meaningful for lines.
    pub norms: [Vec2; 2],
    /// Outward unit bisector at the corner where the previous segment's end
    /// meets this segment's start. Adjacent edges that double back on each
    /// other (a 180° corner) cancel before normalization and leave this
    /// vector undefined, though finite.
    pub mid: Vec2,
}

impl Segment {
    fn line(end: Point) -> Self {
        Self {
            shape: SegmentShape::Line { end },
            norms: [Vec2::ZERO; 2],
            mid: Vec2::ZERO,
        }
    }

    fn quad(ctrl: Point, end: Point) -> Self {
        Self {
            shape: SegmentShape::Quad { ctrl, end },
            norms: [Vec2::ZERO; 2],
            mid: Vec2::ZERO,
        }
    }

    /// Number of points carried by the shape: 1 for a line, 2 for a quad.
    pub fn point_count(&self) -> usize {
        match self.shape {
            SegmentShape::Line { .. } => 1,
            SegmentShape::Quad { .. } => 2,
        }
    }

    /// The shape's `i`th point.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.point_count()`.
    pub fn point(&self, i: usize) -> Point {
        match (self.shape, i) {
            (SegmentShape::Line { end }, 0) => end,
            (SegmentShape::Quad { ctrl, .. }, 0) => ctrl,
            (SegmentShape::Quad { end, .. }, 1) => end,
            _ => panic!("segment point index {i} out of range"),
        }
    }

    /// The point where the segment ends.
    pub fn end_point(&self) -> Point {
        match self.shape {
            SegmentShape::Line { end } | SegmentShape::Quad { end, .. } => end,
        }
    }

    /// The outward normal at the segment's endpoint.
    pub fn end_normal(&self) -> Vec2 {
        self.norms[self.point_count() - 1]
    }
}

/// Segment storage with inline capacity for typical paths.
pub type SegmentVec = SmallVec<[Segment; 8]>;

/// Why a path could not be reduced to a drawable segment loop.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The path contains no segments.
    #[error("path contains no segments")]
    EmptyPath,
    /// The path collapses to a point or line within tolerance and would
    /// render too heavy under distance-field coverage.
    #[error("path collapses to a point or line within tolerance")]
    DegeneratePath,
}

/// A convex path reduced to its segment loop, interior fan point, and exact
/// mesh budget.
#[derive(Clone, Debug)]
pub struct ConvexOutline {
    /// Closed ordered segment sequence.
    pub segments: SegmentVec,
    /// Interior point every segment is visible from.
    pub fan_point: Point,
    /// Exact vertex and index counts the mesh writer will emit.
    pub counts: MeshCounts,
}

impl ConvexOutline {
    /// Walks `path`'s commands and builds the segment loop.
    ///
    /// Cubics are subdivided into quadratics at one device unit of accuracy.
    /// An open contour is closed with a line back to its start. Every point
    /// encountered feeds the degeneracy test; a degenerate path yields an
    /// error rather than a loop.
    ///
    /// `path` must already be in device space and is expected to be convex
    /// with a well-defined winding direction; an indeterminate direction is
    /// a caller contract violation and panics in debug builds.
    pub fn from_path(path: &BezPath) -> Result<Self, ExtractError> {
        let mut segments = SegmentVec::new();
        let mut degeneracy = DegeneracyTest::default();
        let mut start = Point::ZERO;
        let mut last = Point::ZERO;
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    degeneracy.update(p);
                    start = p;
                    last = p;
                }
                PathEl::LineTo(p) => {
                    degeneracy.update(p);
                    segments.push(Segment::line(p));
                    last = p;
                }
                PathEl::QuadTo(p1, p2) => {
                    degeneracy.update(p1);
                    degeneracy.update(p2);
                    segments.push(Segment::quad(p1, p2));
                    last = p2;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    degeneracy.update(p1);
                    degeneracy.update(p2);
                    degeneracy.update(p3);
                    let cubic = CubicBez::new(last, p1, p2, p3);
                    for (_t0, _t1, quad) in cubic.to_quads(CUBIC_TO_QUADS_ACCURACY) {
                        segments.push(Segment::quad(quad.p1, quad.p2));
                    }
                    last = p3;
                }
                PathEl::ClosePath => {
                    if last != start {
                        segments.push(Segment::line(start));
                        last = start;
                    }
                }
            }
        }
        // An unclosed contour still bounds a region; close it explicitly.
        if !segments.is_empty() && last != start {
            segments.push(Segment::line(start));
        }

        if segments.is_empty() {
            return Err(ExtractError::EmptyPath);
        }
        if degeneracy.is_degenerate() {
            return Err(ExtractError::DegeneratePath);
        }

        let endpoints: SmallVec<[Point; 8]> =
            segments.iter().map(Segment::end_point).collect();
        let dir = winding::loop_direction(&endpoints).unwrap_or_else(|| {
            debug_assert!(false, "convex path without a computable winding direction");
            Direction::Ccw
        });
        let (fan_point, counts) = fan::compute_vectors(&mut segments, dir);
        Ok(Self {
            segments,
            fan_point,
            counts,
        })
    }
}
