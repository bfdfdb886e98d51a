//! Document model: tiles, their geometry, and the copy-on-write tile list.
//!
//! This module defines what is on the canvas (`Tile`, `Color`, `Fit`), the
//! rectangle every tile occupies (`Geometry`), a sparse-update type for edits
//! coming from the host (`PartialGeometry`), and the versioned collection that
//! owns all live tiles (`TileList`).
//!
//! `TileList` never mutates in place. Every edit returns a new list with a
//! bumped version; tiles the edit did not touch are shared with the previous
//! list through `Arc`, so callers can compare snapshots cheaply.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tile.
pub type TileId = Uuid;

/// Fill color shown behind a tile's photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
}

impl Color {
    /// The fixed palette new tiles draw from.
    pub const ALL: [Color; 5] = [Self::Red, Self::Blue, Self::Yellow, Self::Green, Self::Purple];

    /// CSS color keyword.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Purple => "purple",
        }
    }
}

/// How a photo is scaled into its tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Scale to fill the tile, cropping the overflow.
    #[default]
    Cover,
    /// Scale to fit inside the tile, letterboxing the remainder.
    Contain,
}

/// Position and size of a tile relative to the canvas origin, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[must_use]
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    /// Bottom edge (`top + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge (`left + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Whether `(x, y)` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Apply every present field of `partial`.
    #[must_use]
    pub fn merged(self, partial: &PartialGeometry) -> Self {
        Self {
            top: partial.top.unwrap_or(self.top),
            left: partial.left.unwrap_or(self.left),
            width: partial.width.unwrap_or(self.width),
            height: partial.height.unwrap_or(self.height),
        }
    }
}

/// A photo tile as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique identifier for this tile.
    pub id: TileId,
    /// Where the tile sits and how big it is.
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Background color drawn behind the photo.
    pub color: Color,
    /// URL of the photo shown in the tile.
    pub photo: String,
    /// How the photo is scaled into the tile.
    pub fit: Fit,
}

/// Sparse geometry update. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialGeometry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl PartialGeometry {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.width.is_none() && self.height.is_none()
    }

    /// Iterate over the present fields as `(name, value)` pairs.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [("top", self.top), ("left", self.left), ("width", self.width), ("height", self.height)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

impl From<Geometry> for PartialGeometry {
    fn from(g: Geometry) -> Self {
        Self { top: Some(g.top), left: Some(g.left), width: Some(g.width), height: Some(g.height) }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DocError {
    #[error("duplicate tile id: {0}")]
    DuplicateId(TileId),
}

/// Versioned, copy-on-write list of tiles in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TileList {
    version: u64,
    tiles: Vec<Arc<Tile>>,
}

impl TileList {
    /// Create an empty list at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit counter; bumped by every successful edit.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Return a new list with `tile` appended.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if a tile with the same id is already present.
    pub fn with_added(&self, tile: Tile) -> Result<Self, DocError> {
        if self.contains(&tile.id) {
            return Err(DocError::DuplicateId(tile.id));
        }
        let mut tiles = self.tiles.clone();
        tiles.push(Arc::new(tile));
        Ok(Self { version: self.version + 1, tiles })
    }

    /// Return a new list without the tile `id`, or `None` if it is absent.
    #[must_use]
    pub fn without(&self, id: &TileId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }
        let tiles = self.tiles.iter().filter(|t| t.id != *id).cloned().collect();
        Some(Self { version: self.version + 1, tiles })
    }

    /// Return a new list where tile `id` has `partial` applied, or `None` if
    /// it is absent. All other tiles are shared with `self`.
    #[must_use]
    pub fn with_update(&self, id: &TileId, partial: &PartialGeometry) -> Option<Self> {
        let index = self.position(id)?;
        let mut tiles = self.tiles.clone();
        let mut tile = Tile::clone(&tiles[index]);
        tile.geometry = tile.geometry.merged(partial);
        tiles[index] = Arc::new(tile);
        Some(Self { version: self.version + 1, tiles })
    }

    /// Look up a tile by id.
    #[must_use]
    pub fn get(&self, id: &TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == *id).map(AsRef::as_ref)
    }

    /// Shared handle to a tile, for identity comparisons across versions.
    #[must_use]
    pub fn get_shared(&self, id: &TileId) -> Option<&Arc<Tile>> {
        self.tiles.iter().find(|t| t.id == *id)
    }

    /// Tile at `index` in insertion order.
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, id: &TileId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &TileId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id == *id)
    }

    /// Tiles in insertion order (first is drawn first, i.e. beneath).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Tile> {
        self.tiles.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
