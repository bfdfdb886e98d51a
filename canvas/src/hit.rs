#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{DELETE_BUTTON_OFFSET_PX, DELETE_BUTTON_SIZE_PX, HANDLE_RADIUS_PX};
use crate::doc::{Geometry, TileId, TileList};
use crate::input::Point;

/// Which part of a tile was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    DeleteButton,
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Every handle drawn on a selected tile.
    pub const ALL: [ResizeAnchor; 8] =
        [Self::Nw, Self::N, Self::Ne, Self::W, Self::E, Self::Sw, Self::S, Self::Se];

    /// Where this handle sits on `g`.
    #[must_use]
    pub fn position(self, g: &Geometry) -> Point {
        let mid_x = g.left + g.width / 2.0;
        let mid_y = g.top + g.height / 2.0;
        match self {
            Self::N => Point::new(mid_x, g.top),
            Self::Ne => Point::new(g.right(), g.top),
            Self::E => Point::new(g.right(), mid_y),
            Self::Se => Point::new(g.right(), g.bottom()),
            Self::S => Point::new(mid_x, g.bottom()),
            Self::Sw => Point::new(g.left, g.bottom()),
            Self::W => Point::new(g.left, mid_y),
            Self::Nw => Point::new(g.left, g.top),
        }
    }

    /// Whether dragging this handle moves the west edge.
    #[must_use]
    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether dragging this handle moves the east edge.
    #[must_use]
    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Whether dragging this handle moves the north edge.
    #[must_use]
    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Whether dragging this handle moves the south edge.
    #[must_use]
    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub tile_id: TileId,
    pub part: HitPart,
}

/// Rectangle of the delete button attached to a selected tile.
///
/// The button overhangs the tile's top-right corner by
/// `DELETE_BUTTON_OFFSET_PX` in both directions.
#[must_use]
pub fn delete_button_rect(g: &Geometry) -> Geometry {
    Geometry::new(
        g.top - DELETE_BUTTON_OFFSET_PX,
        g.right() + DELETE_BUTTON_OFFSET_PX - DELETE_BUTTON_SIZE_PX,
        DELETE_BUTTON_SIZE_PX,
        DELETE_BUTTON_SIZE_PX,
    )
}

fn near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= HANDLE_RADIUS_PX && (a.y - b.y).abs() <= HANDLE_RADIUS_PX
}

/// Test which tile (if any) is under `pt`.
///
/// The selected tile's delete button and handles win over every body. Bodies
/// are tested from the last inserted tile down, matching draw order.
#[must_use]
pub fn hit_test(pt: Point, tiles: &TileList, selected: Option<TileId>) -> Option<Hit> {
    if let Some(tile) = selected.and_then(|id| tiles.get(&id)) {
        if delete_button_rect(&tile.geometry).contains(pt.x, pt.y) {
            return Some(Hit { tile_id: tile.id, part: HitPart::DeleteButton });
        }
        for anchor in ResizeAnchor::ALL {
            if near(pt, anchor.position(&tile.geometry)) {
                return Some(Hit { tile_id: tile.id, part: HitPart::ResizeHandle(anchor) });
            }
        }
    }

    tiles
        .iter()
        .rev()
        .find(|t| t.geometry.contains(pt.x, pt.y))
        .map(|t| Hit { tile_id: t.id, part: HitPart::Body })
}
