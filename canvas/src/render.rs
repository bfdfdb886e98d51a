//! Scene building: turns engine state into an ordered display list.
//!
//! Nothing here touches a drawing API. Hosts replay the returned `DrawOp`s on
//! whatever surface they own (the `web` module uses a 2D canvas context).

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{BACKGROUND_COLOR, DELETE_BUTTON_COLOR, HANDLE_SIZE_PX, SELECTION_COLOR};
use crate::doc::{Fit, Geometry, TileId};
use crate::engine::EngineCore;
use crate::hit::{ResizeAnchor, delete_button_rect};

/// One drawing instruction, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill the whole parent rectangle.
    Background { width: f64, height: f64, color: &'static str },
    /// A tile: solid fill, then the photo scaled per `fit`.
    Tile { id: TileId, rect: Geometry, color: &'static str, photo: String, fit: Fit },
    /// Outline around the selected tile.
    SelectionOutline { rect: Geometry, color: &'static str },
    /// A square resize handle centered on the given rect.
    Handle { rect: Geometry, color: &'static str },
    /// The delete button with its "X" label.
    DeleteButton { rect: Geometry, color: &'static str, label: &'static str },
}

/// Build the display list for the current engine state.
#[must_use]
pub fn scene(core: &EngineCore) -> Vec<DrawOp> {
    let mut ops = vec![DrawOp::Background {
        width: core.bounds.width,
        height: core.bounds.height,
        color: BACKGROUND_COLOR,
    }];

    ops.extend(core.tiles.iter().map(|t| DrawOp::Tile {
        id: t.id,
        rect: t.geometry,
        color: t.color.css(),
        photo: t.photo.clone(),
        fit: t.fit,
    }));

    if let Some(tile) = core.selection().and_then(|id| core.tile(&id)) {
        let g = tile.geometry;
        ops.push(DrawOp::SelectionOutline { rect: g, color: SELECTION_COLOR });
        for anchor in ResizeAnchor::ALL {
            let c = anchor.position(&g);
            let half = HANDLE_SIZE_PX / 2.0;
            ops.push(DrawOp::Handle {
                rect: Geometry::new(c.y - half, c.x - half, HANDLE_SIZE_PX, HANDLE_SIZE_PX),
                color: SELECTION_COLOR,
            });
        }
        ops.push(DrawOp::DeleteButton { rect: delete_button_rect(&g), color: DELETE_BUTTON_COLOR, label: "X" });
    }

    ops
}

/// Source and destination rectangles for drawing an image into a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// Region of the image to sample, in image pixels.
    pub src: Geometry,
    /// Region of the canvas to paint, in canvas pixels.
    pub dest: Geometry,
}

/// Place an `image_w` × `image_h` image into `dest` according to `fit`.
///
/// `Cover` samples a centered crop with the tile's aspect ratio and paints the
/// whole tile. `Contain` samples the whole image and paints a centered,
/// letterboxed region. Degenerate sizes yield `None`.
#[must_use]
pub fn fit_image(fit: Fit, image_w: f64, image_h: f64, dest: Geometry) -> Option<ImagePlacement> {
    if image_w <= 0.0 || image_h <= 0.0 || dest.width <= 0.0 || dest.height <= 0.0 {
        return None;
    }
    let whole_image = Geometry::new(0.0, 0.0, image_w, image_h);

    match fit {
        Fit::Cover => {
            let scale = (dest.width / image_w).max(dest.height / image_h);
            let src_w = dest.width / scale;
            let src_h = dest.height / scale;
            let src = Geometry::new((image_h - src_h) / 2.0, (image_w - src_w) / 2.0, src_w, src_h);
            Some(ImagePlacement { src, dest })
        }
        Fit::Contain => {
            let scale = (dest.width / image_w).min(dest.height / image_h);
            let w = image_w * scale;
            let h = image_h * scale;
            let painted = Geometry::new(dest.top + (dest.height - h) / 2.0, dest.left + (dest.width - w) / 2.0, w, h);
            Some(ImagePlacement { src: whole_image, dest: painted })
        }
    }
}
