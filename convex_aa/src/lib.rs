// Copyright 2026 the Convex AA Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Analytic anti-aliased triangle meshing for convex Bézier paths.
//!
//! This crate turns a convex [`kurbo::BezPath`] into a triangle mesh whose
//! vertices carry the parameters of an analytic coverage function, so a GPU
//! fragment stage can anti-alias the path's edges without supersampling. The
//! interior is a fan around a single interior point; every boundary segment
//! additionally grows a one-unit skirt quad along its outward normals, and a
//! small wedge bridges adjacent skirts at each corner.
//!
//! Straight edges encode coverage as a linear ramp in the vertex UV channel.
//! Curved edges map their vertices into the canonical frame of the
//! quadratic, where the curve is the zero set of `u² - v`, plus two linear
//! distance fields that bound the curved region against its chord lines.
//! Cubics are subdivided into quadratics first.
//!
//! The GPU itself stays behind the [`DrawTarget`] trait: the renderer asks
//! it for exactly-sized vertex and index reservations, fills them, and
//! submits one indexed triangle-list draw. Paths that collapse to a point or
//! line within tolerance are skipped entirely, as a distance-field evaluator
//! would overemphasize them.

#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
#![forbid(unsafe_code)]

pub mod degenerate;
pub mod fan;
pub mod math;
pub mod mesh;
pub mod render;
pub mod segment;
pub mod winding;

pub use peniko;
pub use peniko::kurbo;

pub use degenerate::DegeneracyTest;
pub use mesh::{MeshCounts, QuadVertex, FAR_DISTANCE};
pub use render::{
    ConvexRenderer, DrawState, DrawTarget, EdgeType, PathFill, StageMask, TargetCaps,
    VertexLayout, STAGE_COUNT,
};
pub use segment::{ConvexOutline, ExtractError, Segment, SegmentShape, SegmentVec};
pub use winding::Direction;
