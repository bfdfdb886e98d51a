//! Tile collection controller and pointer gesture handling.
//!
//! `EngineCore` owns everything the canvas needs between events: the tile
//! list, the selection, the parent bounds and the gesture in progress. It has
//! no browser or runtime dependencies; the terminal host and the `web`
//! binding both drive it directly.

use tracing::{debug, info, warn};

use crate::bounds::{DragProposal, ParentBounds, ResizeOutcome, ResizeProposal, clamp_drag, clamp_resize};
use crate::consts::{DEFAULT_TILE_SIZE, MIN_TILE_SIZE};
use crate::doc::{Color, Fit, Geometry, PartialGeometry, Tile, TileId, TileList};
use crate::hit::{HitPart, hit_test};
use crate::ids::{IdSource, Picker, UuidIds};
use crate::input::{Button, InputState, Point, UiState, drag_proposal, resize_proposal};
use crate::photo::PhotoOutcome;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    TileAdded(Tile),
    TileUpdated { id: TileId, geometry: Geometry },
    TileRemoved { id: TileId },
    SelectionChanged(Option<TileId>),
    SetCursor(&'static str),
    RenderNeeded,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TileError {
    #[error("tile not found: {0}")]
    NotFound(TileId),
    #[error("invalid geometry: {field} = {value}")]
    InvalidGeometry { field: &'static str, value: f64 },
}

/// Fresh ids requested per add before giving up on a colliding source.
const MAX_ID_ATTEMPTS: usize = 16;

fn ensure_min_size(fields: impl IntoIterator<Item = (&'static str, f64)>) -> Result<(), TileError> {
    for (field, value) in fields {
        if value < MIN_TILE_SIZE {
            return Err(TileError::InvalidGeometry { field, value });
        }
    }
    Ok(())
}

fn ensure_finite(fields: impl IntoIterator<Item = (&'static str, f64)>) -> Result<(), TileError> {
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(TileError::InvalidGeometry { field, value });
        }
    }
    Ok(())
}

/// Core engine state.
pub struct EngineCore {
    pub tiles: TileList,
    pub ui: UiState,
    pub input: InputState,
    pub bounds: ParentBounds,
    ids: Box<dyn IdSource>,
    picker: Box<dyn Picker>,
}

impl EngineCore {
    /// Engine with random UUIDs and the given color picker.
    #[must_use]
    pub fn new(bounds: ParentBounds, picker: Box<dyn Picker>) -> Self {
        Self::with_sources(bounds, Box::new(UuidIds), picker)
    }

    /// Engine with explicit id and color sources.
    #[must_use]
    pub fn with_sources(bounds: ParentBounds, ids: Box<dyn IdSource>, picker: Box<dyn Picker>) -> Self {
        Self {
            tiles: TileList::new(),
            ui: UiState::default(),
            input: InputState::default(),
            bounds,
            ids,
            picker,
        }
    }

    /// Update the parent's measured rectangle.
    pub fn set_bounds(&mut self, bounds: ParentBounds) {
        debug!(width = bounds.width, height = bounds.height, "bounds changed");
        self.bounds = bounds;
    }

    // --- Collection ---

    /// Append a tile for a fetched photo with a fresh id, a palette color and
    /// the default geometry.
    pub fn add_photo(&mut self, photo: &PhotoOutcome) -> Action {
        let Some(id) = (0..MAX_ID_ATTEMPTS).map(|_| self.ids.next_id()).find(|id| !self.tiles.contains(id)) else {
            warn!(attempts = MAX_ID_ATTEMPTS, "id source kept returning taken ids, tile not added");
            return Action::None;
        };
        let color = Color::ALL[self.picker.pick(Color::ALL.len()) % Color::ALL.len()];
        let tile = Tile {
            id,
            geometry: Geometry::new(0.0, 0.0, DEFAULT_TILE_SIZE, DEFAULT_TILE_SIZE),
            color,
            photo: photo.url().to_string(),
            fit: Fit::Cover,
        };

        match self.tiles.with_added(tile.clone()) {
            Ok(next) => {
                self.tiles = next;
                info!(%id, color = color.css(), fallback = photo.is_fallback(), "tile added");
                Action::TileAdded(tile)
            }
            Err(e) => {
                debug!(error = %e, "tile add skipped");
                Action::None
            }
        }
    }

    /// Remove a tile. Unknown ids are ignored. Removing the selected tile
    /// clears the selection.
    pub fn remove(&mut self, id: &TileId) -> Action {
        let Some(next) = self.tiles.without(id) else {
            return Action::None;
        };
        self.tiles = next;
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
        }
        if self.input.tile_id().as_ref() == Some(id) {
            self.input = InputState::Idle;
        }
        info!(%id, "tile removed");
        Action::TileRemoved { id: *id }
    }

    /// Apply a sparse geometry update to one tile. Unknown ids are ignored.
    ///
    /// The merged geometry is kept inside the bounds: width and height are
    /// capped at the parent size, then the origin is clamped like a drag.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if a supplied field is not finite or a
    /// supplied width/height is below `MIN_TILE_SIZE`.
    pub fn update(&mut self, id: &TileId, partial: &PartialGeometry) -> Result<Action, TileError> {
        ensure_finite(partial.fields())?;
        ensure_min_size(partial.fields().filter(|(field, _)| matches!(*field, "width" | "height")))?;
        let Some(current) = self.tiles.get(id) else {
            return Ok(Action::None);
        };
        let merged = current.geometry.merged(partial);
        let sized = Geometry {
            width: merged.width.min(self.bounds.width),
            height: merged.height.min(self.bounds.height),
            ..merged
        };
        let placed = clamp_drag(&sized, DragProposal { top: merged.top, left: merged.left }, self.bounds);
        self.commit(id, placed)
    }

    /// Mark a tile selected. Unknown ids are ignored.
    pub fn select(&mut self, id: &TileId) -> Action {
        if !self.tiles.contains(id) || self.ui.selected_id.as_ref() == Some(id) {
            return Action::None;
        }
        self.ui.selected_id = Some(*id);
        debug!(%id, "tile selected");
        Action::SelectionChanged(Some(*id))
    }

    // --- Clamped edits ---

    /// Move a tile to a proposed origin, clamped into the bounds. The tile's
    /// current width/height are used for the clamp.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids and `InvalidGeometry` for non-finite
    /// proposals.
    pub fn drag(&mut self, id: &TileId, proposal: DragProposal) -> Result<Action, TileError> {
        ensure_finite([("top", proposal.top), ("left", proposal.left)])?;
        let snapshot = self.geometry(id)?;
        let clamped = clamp_drag(&snapshot, proposal, self.bounds);
        self.commit(id, clamped)
    }

    /// Resize a tile to a proposed size, clamped against the bounds. The
    /// tile's current top/left are used for the clamp and are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids and `InvalidGeometry` for non-finite
    /// proposals or sizes below `MIN_TILE_SIZE`.
    pub fn resize(&mut self, id: &TileId, proposal: ResizeProposal) -> Result<ResizeOutcome, TileError> {
        ensure_finite([
            ("width", proposal.width),
            ("height", proposal.height),
            ("offset_x", proposal.offset_x),
            ("offset_y", proposal.offset_y),
        ])?;
        ensure_min_size([("width", proposal.width), ("height", proposal.height)])?;
        let snapshot = self.geometry(id)?;
        let outcome = clamp_resize(&snapshot, proposal, self.bounds);
        self.commit(id, outcome.geometry)?;
        Ok(outcome)
    }

    fn commit(&mut self, id: &TileId, geometry: Geometry) -> Result<Action, TileError> {
        let next = self
            .tiles
            .with_update(id, &PartialGeometry::from(geometry))
            .ok_or(TileError::NotFound(*id))?;
        self.tiles = next;
        Ok(self.updated(id))
    }

    fn updated(&self, id: &TileId) -> Action {
        match self.tiles.get(id) {
            Some(tile) => Action::TileUpdated { id: *id, geometry: tile.geometry },
            None => Action::None,
        }
    }

    fn geometry(&self, id: &TileId) -> Result<Geometry, TileError> {
        self.tiles
            .get(id)
            .map(|t| t.geometry)
            .ok_or(TileError::NotFound(*id))
    }

    // --- Pointer input ---

    /// Start a gesture at `pt`.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Some(hit) = hit_test(pt, &self.tiles, self.ui.selected_id) else {
            self.input = InputState::Idle;
            return Vec::new();
        };
        let Ok(orig) = self.geometry(&hit.tile_id) else {
            return Vec::new();
        };

        match hit.part {
            HitPart::DeleteButton => {
                self.input = InputState::Idle;
                vec![self.remove(&hit.tile_id), Action::RenderNeeded]
            }
            HitPart::ResizeHandle(anchor) => {
                self.input = InputState::ResizingTile { id: hit.tile_id, anchor, start: pt, orig };
                vec![Action::SetCursor(anchor.cursor())]
            }
            HitPart::Body if self.ui.selected_id == Some(hit.tile_id) => {
                self.input = InputState::DraggingTile { id: hit.tile_id, start: pt, orig };
                vec![Action::SetCursor("move")]
            }
            HitPart::Body => {
                self.input = InputState::Pressing { id: hit.tile_id };
                Vec::new()
            }
        }
    }

    /// Continue the current gesture.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let result = match self.input {
            InputState::DraggingTile { id, start, orig } => self.drag(&id, drag_proposal(&orig, start, pt)),
            InputState::ResizingTile { id, anchor, start, orig } => self
                .resize(&id, resize_proposal(anchor, &orig, start, pt))
                .map(|_| self.updated(&id)),
            InputState::Idle | InputState::Pressing { .. } => return vec![Action::SetCursor(self.cursor_at(pt))],
        };

        match result {
            Ok(action) => vec![action, Action::RenderNeeded],
            Err(e) => {
                debug!(error = %e, "gesture dropped");
                self.input = InputState::Idle;
                Vec::new()
            }
        }
    }

    /// Finish the current gesture. Releasing over the tile a press started on
    /// selects it.
    pub fn on_pointer_up(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let finished = std::mem::take(&mut self.input);
        let mut actions = Vec::new();

        if let InputState::Pressing { id } = finished {
            let released_on = hit_test(pt, &self.tiles, self.ui.selected_id).map(|h| h.tile_id);
            if released_on == Some(id) {
                actions.push(self.select(&id));
            }
        }

        actions.retain(|a| *a != Action::None);
        actions.push(Action::SetCursor(self.cursor_at(pt)));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Queries ---

    /// The currently selected tile, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TileId> {
        self.ui.selected_id
    }

    /// Look up a tile by id.
    #[must_use]
    pub fn tile(&self, id: &TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// CSS cursor for hovering at `pt`.
    #[must_use]
    pub fn cursor_at(&self, pt: Point) -> &'static str {
        match hit_test(pt, &self.tiles, self.ui.selected_id) {
            Some(hit) => match hit.part {
                HitPart::DeleteButton => "pointer",
                HitPart::ResizeHandle(anchor) => anchor.cursor(),
                HitPart::Body if self.ui.selected_id == Some(hit.tile_id) => "move",
                HitPart::Body => "pointer",
            },
            None => "default",
        }
    }
}
