//! Shared numeric constants for the canvas crate.

// ── Tiles ───────────────────────────────────────────────────────

/// Width and height given to a freshly added tile, in pixels.
pub const DEFAULT_TILE_SIZE: f64 = 100.0;

/// Smallest width or height a resize gesture will propose.
pub const MIN_TILE_SIZE: f64 = 1.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit slop in pixels around each resize handle.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Drawn edge length of a resize handle.
pub const HANDLE_SIZE_PX: f64 = 8.0;

/// Edge length of the square delete button.
pub const DELETE_BUTTON_SIZE_PX: f64 = 20.0;

/// How far the delete button sticks out past the tile's top-right corner.
pub const DELETE_BUTTON_OFFSET_PX: f64 = 10.0;

// ── Colors ──────────────────────────────────────────────────────

/// Canvas background.
pub const BACKGROUND_COLOR: &str = "black";

/// Selection outline and handle color.
pub const SELECTION_COLOR: &str = "#44aaff";

/// Delete button fill.
pub const DELETE_BUTTON_COLOR: &str = "red";
