// Copyright 2026 the Convex AA Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-time orchestration against an abstract GPU target.

use log::debug;
use peniko::Fill;

use crate::kurbo::{Affine, BezPath, Vec2};
use crate::mesh::{self, QuadVertex};
use crate::segment::ConvexOutline;
use crate::winding;

/// Number of texture-coordinate stages carried by a [`DrawState`].
pub const STAGE_COUNT: usize = 4;

/// Bit mask selecting draw-state stages; bit `s` selects stage `s`.
pub type StageMask = u32;

/// Fill rule requested for a path draw.
///
/// The inverted and hairline rules exist so [`ConvexRenderer::can_draw_path`]
/// can refuse them; this renderer fills plain interiors only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFill {
    /// Non-zero winding fill.
    Winding,
    /// Even-odd fill.
    EvenOdd,
    /// Everything but the non-zero interior.
    InverseWinding,
    /// Everything but the even-odd interior.
    InverseEvenOdd,
    /// Zero-width outline.
    Hairline,
}

impl PathFill {
    /// Whether the rule fills the complement of the path interior.
    pub fn is_inverted(self) -> bool {
        matches!(self, Self::InverseWinding | Self::InverseEvenOdd)
    }
}

impl From<Fill> for PathFill {
    fn from(fill: Fill) -> Self {
        match fill {
            Fill::NonZero => Self::Winding,
            Fill::EvenOdd => Self::EvenOdd,
        }
    }
}

/// Capabilities of a draw target that this renderer cares about.
#[derive(Clone, Copy, Debug, Default)]
pub struct TargetCaps {
    /// Whether the fragment stage can evaluate screen-space derivatives.
    pub shader_derivative_support: bool,
}

/// Coverage evaluator the fragment stage runs on interpolated edge data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeType {
    /// No analytic edge anti-aliasing.
    #[default]
    None,
    /// Implicit-quadratic evaluator matching [`QuadVertex`] edge data.
    Quad,
}

/// Bit set describing the per-vertex attributes a reservation must provide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexLayout {
    bits: u32,
}

impl VertexLayout {
    const EDGE_BIT: u32 = 1 << STAGE_COUNT;

    /// Layout with no attributes beyond position.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Requests edge coverage data (UV and distance fields) per vertex.
    pub fn set_edge_data(&mut self) {
        self.bits |= Self::EDGE_BIT;
    }

    /// Whether edge coverage data is present.
    pub fn has_edge_data(self) -> bool {
        self.bits & Self::EDGE_BIT != 0
    }

    /// Requests that `stage` source its texture coordinates from vertex
    /// positions.
    pub fn set_stage_pos_as_tex_coord(&mut self, stage: usize) {
        debug_assert!(stage < STAGE_COUNT);
        self.bits |= 1 << stage;
    }

    /// Whether `stage` sources its texture coordinates from positions.
    pub fn stage_uses_pos_as_tex_coord(self, stage: usize) -> bool {
        self.bits & (1 << stage) != 0
    }
}

/// Mutable draw state owned by a target: the view transform, one texture
/// coordinate transform per stage, and the edge anti-aliasing mode.
#[derive(Clone, Debug)]
pub struct DrawState {
    view_matrix: Affine,
    sampler_matrices: [Affine; STAGE_COUNT],
    edge_type: EdgeType,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            view_matrix: Affine::IDENTITY,
            sampler_matrices: [Affine::IDENTITY; STAGE_COUNT],
            edge_type: EdgeType::None,
        }
    }
}

impl DrawState {
    /// The current view transform.
    pub fn view_matrix(&self) -> Affine {
        self.view_matrix
    }

    /// Replaces the view transform.
    pub fn set_view_matrix(&mut self, m: Affine) {
        self.view_matrix = m;
    }

    /// The texture coordinate transform of `stage`.
    pub fn sampler_matrix(&self, stage: usize) -> Affine {
        self.sampler_matrices[stage]
    }

    /// Pre-concatenates `m` onto the sampler matrix of every stage selected
    /// by `mask`, so `m` applies to coordinates before the existing
    /// transform.
    pub fn pre_concat_sampler_matrices(&mut self, mask: StageMask, m: Affine) {
        for (stage, sampler) in self.sampler_matrices.iter_mut().enumerate() {
            if mask & (1 << stage) != 0 {
                *sampler *= m;
            }
        }
    }

    /// The edge anti-aliasing mode.
    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    /// Selects the coverage evaluator for subsequent draws.
    pub fn set_edge_type(&mut self, edge_type: EdgeType) {
        self.edge_type = edge_type;
    }
}

/// Geometry sink and draw submission interface driven by the renderer.
///
/// Reservations are two-step: vertex space first, then index space. A target
/// must keep a vertex reservation alive until it is either drawn or released
/// with [`release_vertex_reservation`](Self::release_vertex_reservation).
pub trait DrawTarget {
    /// The target's capabilities.
    fn caps(&self) -> TargetCaps;

    /// The target's mutable draw state.
    fn draw_state(&mut self) -> &mut DrawState;

    /// Reserves space for `count` vertices of the given layout. Returns
    /// false when the space cannot be provided, leaving nothing reserved.
    fn reserve_vertices(&mut self, layout: VertexLayout, count: usize) -> bool;

    /// Reserves space for `count` indices. Returns false when the space
    /// cannot be provided.
    fn reserve_indices(&mut self, count: usize) -> bool;

    /// Releases a vertex reservation that will not be drawn.
    fn release_vertex_reservation(&mut self);

    /// Borrows both reserved regions for writing in a single pass.
    fn reserved_geometry(&mut self) -> (&mut [QuadVertex], &mut [u16]);

    /// Submits an indexed triangle-list draw over the reserved regions.
    fn draw_indexed_triangles(
        &mut self,
        start_vertex: usize,
        start_index: usize,
        vertex_count: usize,
        index_count: usize,
    );
}

/// Renderer producing analytically anti-aliased fills for convex paths.
///
/// The path is triangulated as a fan around an interior point, each boundary
/// segment grows a one-unit skirt along its outward normals, and every
/// vertex carries the UV and distance data the fragment-stage quadratic edge
/// evaluator turns into coverage. No multisampling is involved.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvexRenderer;

impl ConvexRenderer {
    /// Creates a renderer.
    pub fn new() -> Self {
        Self
    }

    /// Whether this renderer can draw `path` with the given fill rule on a
    /// target with `caps`.
    pub fn can_draw_path(
        &self,
        caps: TargetCaps,
        path: &BezPath,
        fill: PathFill,
        antialias: bool,
    ) -> bool {
        caps.shader_derivative_support
            && antialias
            && fill != PathFill::Hairline
            && !fill.is_inverted()
            && winding::is_convex(path)
    }

    /// Generates the mesh for `path` and submits one indexed draw.
    ///
    /// `translate` is an extra device-space offset composed after the
    /// target's view transform; `stage_mask` selects the stages whose
    /// texture coordinates were expressed in the pre-view space and need
    /// correcting once the view moves into the vertices. Expected early-outs
    /// (empty or degenerate path, failed reservation) return without
    /// submitting anything; a failed index reservation releases the vertex
    /// reservation first.
    ///
    /// `path` must be convex; this is the caller's contract and is only
    /// debug-asserted.
    pub fn draw_path(
        &self,
        target: &mut impl DrawTarget,
        path: &BezPath,
        translate: Vec2,
        stage_mask: StageMask,
    ) {
        debug_assert!(winding::is_convex(path), "draw_path requires a convex path");
        if path.elements().is_empty() {
            return;
        }

        let state = target.draw_state();
        let view_matrix = Affine::translate(translate) * state.view_matrix();
        // The view moves into the vertices below; sampler coordinates
        // expressed in the old space are corrected by the inverse. A
        // non-invertible view skips the correction.
        if view_matrix.determinant() != 0.0 {
            state.pre_concat_sampler_matrices(stage_mask, view_matrix.inverse());
        }
        state.set_view_matrix(Affine::IDENTITY);

        let device_path: BezPath = path
            .elements()
            .iter()
            .map(|&el| view_matrix * el)
            .collect();

        let outline = match ConvexOutline::from_path(&device_path) {
            Ok(outline) => outline,
            Err(err) => {
                debug!("convex fill skipped: {err}");
                return;
            }
        };

        let mut layout = VertexLayout::new();
        for stage in 0..STAGE_COUNT {
            if stage_mask & (1 << stage) != 0 {
                layout.set_stage_pos_as_tex_coord(stage);
            }
        }
        layout.set_edge_data();

        if !target.reserve_vertices(layout, outline.counts.vertices) {
            debug!("convex fill skipped: vertex reservation failed");
            return;
        }
        if !target.reserve_indices(outline.counts.indices) {
            target.release_vertex_reservation();
            debug!("convex fill skipped: index reservation failed");
            return;
        }

        {
            let (verts, idxs) = target.reserved_geometry();
            mesh::write_mesh(
                &outline.segments,
                outline.fan_point,
                &mut verts[..outline.counts.vertices],
                &mut idxs[..outline.counts.indices],
            );
        }

        target.draw_state().set_edge_type(EdgeType::Quad);
        target.draw_indexed_triangles(0, 0, outline.counts.vertices, outline.counts.indices);
    }
}

#[cfg(test)]
mod tests {
    use super::{PathFill, VertexLayout};
    use peniko::Fill;

    #[test]
    fn fill_conversion() {
        assert_eq!(PathFill::from(Fill::NonZero), PathFill::Winding);
        assert_eq!(PathFill::from(Fill::EvenOdd), PathFill::EvenOdd);
    }

    #[test]
    fn inverted_fills() {
        assert!(PathFill::InverseWinding.is_inverted());
        assert!(PathFill::InverseEvenOdd.is_inverted());
        assert!(!PathFill::Winding.is_inverted());
        assert!(!PathFill::Hairline.is_inverted());
    }

    #[test]
    fn layout_bits() {
        let mut layout = VertexLayout::new();
        assert!(!layout.has_edge_data());
        layout.set_edge_data();
        layout.set_stage_pos_as_tex_coord(2);
        assert!(layout.has_edge_data());
        assert!(layout.stage_uses_pos_as_tex_coord(2));
        assert!(!layout.stage_uses_pos_as_tex_coord(0));
    }
}
