//! Bounds clamping for drag and resize proposals.
//!
//! Both clamps take an immutable snapshot of the tile's geometry before the
//! event, the proposal emitted by the gesture, and the parent's measured
//! rectangle. A drag keeps the snapshot's width/height and only moves the
//! origin; a resize keeps the snapshot's top/left and only changes the size.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::doc::Geometry;

/// Measured size of the container tiles live in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentBounds {
    pub width: f64,
    pub height: f64,
}

impl ParentBounds {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// New origin suggested by a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragProposal {
    pub top: f64,
    pub left: f64,
}

/// New size suggested by a resize, plus the translation the gesture applied
/// to the element while resizing from a north or west handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeProposal {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ResizeProposal {
    /// A proposal with no offset, as produced by south/east handles.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, offset_x: 0.0, offset_y: 0.0 }
    }
}

/// Result of clamping a resize: the geometry to commit and the offset the
/// gesture should keep applying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub geometry: Geometry,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Clamp a drag so the tile stays inside `bounds`.
///
/// Width and height come from `snapshot`, not from any in-progress resize.
/// Each axis checks the lower bound first: a negative origin becomes 0,
/// otherwise an origin whose far edge overshoots becomes `limit - extent`.
/// For a tile larger than its parent that means a negative proposal pins it
/// to 0 and any other proposal pins its far edge to the bottom/right edge.
#[must_use]
pub fn clamp_drag(snapshot: &Geometry, proposal: DragProposal, bounds: ParentBounds) -> Geometry {
    Geometry {
        top: clamp_axis(proposal.top, snapshot.height, bounds.height),
        left: clamp_axis(proposal.left, snapshot.width, bounds.width),
        width: snapshot.width,
        height: snapshot.height,
    }
}

fn clamp_axis(start: f64, extent: f64, limit: f64) -> f64 {
    if start < 0.0 {
        0.0
    } else if start + extent > limit {
        limit - extent
    } else {
        start
    }
}

/// Clamp a resize so the tile's far edges stay inside `bounds`.
///
/// The origin comes from `snapshot`. When an axis is clamped, its offset is
/// reset to zero.
#[must_use]
pub fn clamp_resize(snapshot: &Geometry, proposal: ResizeProposal, bounds: ParentBounds) -> ResizeOutcome {
    let mut outcome = ResizeOutcome {
        geometry: Geometry {
            top: snapshot.top,
            left: snapshot.left,
            width: proposal.width,
            height: proposal.height,
        },
        offset_x: proposal.offset_x,
        offset_y: proposal.offset_y,
    };

    if snapshot.top + proposal.height > bounds.height {
        outcome.geometry.height = bounds.height - snapshot.top;
        outcome.offset_y = 0.0;
    }

    if snapshot.left + proposal.width > bounds.width {
        outcome.geometry.width = bounds.width - snapshot.left;
        outcome.offset_x = 0.0;
    }

    outcome
}
