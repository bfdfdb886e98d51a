//! Input model: pointer positions, mouse buttons, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. Drag and resize gestures remember where the pointer started and
//! the tile's geometry at that moment; each pointer move turns the total
//! pointer delta into a proposal which the engine then clamps.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::bounds::{DragProposal, ResizeProposal};
use crate::consts::MIN_TILE_SIZE;
use crate::doc::{Geometry, TileId};
use crate::hit::ResizeAnchor;

/// A point in canvas coordinates (CSS pixels from the canvas's top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected tile, if any.
    pub selected_id: Option<TileId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer went down on an unselected tile; releasing over it selects it.
    Pressing {
        /// Tile under the pointer at pointer-down.
        id: TileId,
    },
    /// The user is moving the selected tile.
    DraggingTile {
        id: TileId,
        /// Pointer position at pointer-down.
        start: Point,
        /// Tile geometry at pointer-down.
        orig: Geometry,
    },
    /// The user is dragging one of the selected tile's eight handles.
    ResizingTile {
        id: TileId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Pointer position at pointer-down.
        start: Point,
        /// Tile geometry at pointer-down.
        orig: Geometry,
    },
}

impl InputState {
    /// The tile the current gesture acts on, if any.
    #[must_use]
    pub fn tile_id(&self) -> Option<TileId> {
        match self {
            Self::Idle => None,
            Self::Pressing { id } | Self::DraggingTile { id, .. } | Self::ResizingTile { id, .. } => Some(*id),
        }
    }
}

/// Proposal for moving a tile whose origin was `orig` when the pointer went
/// down at `start` and is now at `current`.
#[must_use]
pub fn drag_proposal(orig: &Geometry, start: Point, current: Point) -> DragProposal {
    DragProposal { top: orig.top + (current.y - start.y), left: orig.left + (current.x - start.x) }
}

/// Proposal for resizing from `anchor`.
///
/// East/south handles grow with the pointer delta. West/north handles grow
/// against it and report the matching translation as the offset. Sizes never
/// drop below `MIN_TILE_SIZE`.
#[must_use]
pub fn resize_proposal(anchor: ResizeAnchor, orig: &Geometry, start: Point, current: Point) -> ResizeProposal {
    let dx = current.x - start.x;
    let dy = current.y - start.y;
    let mut proposal = ResizeProposal::new(orig.width, orig.height);

    if anchor.moves_east() {
        proposal.width = (orig.width + dx).max(MIN_TILE_SIZE);
    } else if anchor.moves_west() {
        proposal.width = (orig.width - dx).max(MIN_TILE_SIZE);
        proposal.offset_x = orig.width - proposal.width;
    }

    if anchor.moves_south() {
        proposal.height = (orig.height + dy).max(MIN_TILE_SIZE);
    } else if anchor.moves_north() {
        proposal.height = (orig.height - dy).max(MIN_TILE_SIZE);
        proposal.offset_y = orig.height - proposal.height;
    }

    proposal
}
