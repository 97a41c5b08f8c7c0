// Copyright 2026 the Convex AA Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detection of paths that collapse to a point or a line.
//!
//! Coverage from a distance field overemphasizes very thin regions: every
//! pixel the path touches is hit with a maximum distance of √2/2, so a path
//! with near-zero area renders far too heavy. Such paths are detected while
//! streaming their points and drawn as nothing at all.

use crate::kurbo::{Point, Vec2};
use crate::math::{orthogonal, Side};

const TOLERANCE: f64 = 1.0 / 16.0;
const TOLERANCE_SQD: f64 = TOLERANCE * TOLERANCE;

/// Incremental classification of a streamed point sequence.
///
/// The test advances `Initial → Point → Line → NonDegenerate` and is
/// terminal in the last state; feed it every point of a path and ask
/// [`is_degenerate`](Self::is_degenerate) at the end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DegeneracyTest {
    /// No points seen yet.
    #[default]
    Initial,
    /// All points so far coincide with `first` within tolerance.
    Point {
        /// The first point seen.
        first: Point,
    },
    /// All points so far lie within tolerance of the line
    /// `normal · p + c = 0`.
    Line {
        /// Unit normal of the line through the first two distinct points.
        normal: Vec2,
        /// Signed offset of that line from the origin.
        c: f64,
    },
    /// The points span a region of meaningful area.
    NonDegenerate,
}

impl DegeneracyTest {
    /// Advances the classification with the next path point.
    pub fn update(&mut self, pt: Point) {
        match *self {
            Self::Initial => *self = Self::Point { first: pt },
            Self::Point { first } => {
                if pt.distance_squared(first) > TOLERANCE_SQD {
                    let normal = orthogonal((pt - first).normalize(), Side::Left);
                    let c = -normal.dot(first.to_vec2());
                    *self = Self::Line { normal, c };
                }
            }
            Self::Line { normal, c } => {
                if (normal.dot(pt.to_vec2()) + c).abs() > TOLERANCE {
                    *self = Self::NonDegenerate;
                }
            }
            Self::NonDegenerate => {}
        }
    }

    /// Whether the points seen so far collapse to a point or a line.
    pub fn is_degenerate(&self) -> bool {
        !matches!(self, Self::NonDegenerate)
    }
}
