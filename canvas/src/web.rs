//! Browser binding for the tile engine.
//!
//! `WebBoard` owns a `<canvas>` element and an `EngineCore`. The host page
//! forwards pointer events and calls `render` once per animation frame; photo
//! fetches run as promises that borrow the engine only after they resolve, so
//! overlapping adds append in completion order.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::bounds::ParentBounds;
use crate::engine::{Action, EngineCore};
use crate::ids::Picker;
use crate::input::{Button, Point};
use crate::photo::{FetchPolicy, HttpPhotoSource, PhotoConfig, fetch_photo, is_usable_url};
use crate::render::{DrawOp, fit_image, scene};

/// Uniform choice from `Math.random`.
struct JsPicker;

impl Picker for JsPicker {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn pick(&mut self, len: usize) -> usize {
        let len = len.max(1);
        ((js_sys::Math::random() * len as f64).floor() as usize).min(len - 1)
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn map_button(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

#[wasm_bindgen]
pub struct WebBoard {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    core: Rc<RefCell<EngineCore>>,
    images: RefCell<HashMap<String, HtmlImageElement>>,
    source: Rc<HttpPhotoSource>,
    policy: FetchPolicy,
}

#[wasm_bindgen]
impl WebBoard {
    /// Bind to `canvas`, sizing the drawing buffer to its layout size.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<WebBoard, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let config = PhotoConfig::default();
        let source = HttpPhotoSource::new(&config).map_err(to_js)?;
        let bounds = ParentBounds::new(f64::from(canvas.client_width()), f64::from(canvas.client_height()));

        let board = WebBoard {
            canvas,
            ctx,
            core: Rc::new(RefCell::new(EngineCore::new(bounds, Box::new(JsPicker)))),
            images: RefCell::new(HashMap::new()),
            source: Rc::new(source),
            policy: FetchPolicy::from(&config),
        };
        board.sync_canvas_size(bounds);
        Ok(board)
    }

    /// Point the board at another listing endpoint and fallback image.
    pub fn configure(&mut self, endpoint: String, retries: u32, fallback_url: Option<String>) -> Result<(), JsValue> {
        if !is_usable_url(&endpoint) {
            return Err(JsValue::from_str("endpoint must be an http(s) URL"));
        }
        let config = PhotoConfig { endpoint, retries, fallback_url, ..PhotoConfig::default() };
        self.source = Rc::new(HttpPhotoSource::new(&config).map_err(to_js)?);
        self.policy = FetchPolicy::from(&config);
        Ok(())
    }

    /// Fetch a photo and add a tile for it. Resolves with the new tile id.
    pub fn add_tile(&self) -> js_sys::Promise {
        let core = Rc::clone(&self.core);
        let source = Rc::clone(&self.source);
        let policy = self.policy.clone();

        wasm_bindgen_futures::future_to_promise(async move {
            let mut picker = JsPicker;
            let outcome = fetch_photo(source.as_ref(), &mut picker, &policy)
                .await
                .map_err(to_js)?;
            match core.borrow_mut().add_photo(&outcome) {
                Action::TileAdded(tile) => Ok(JsValue::from_str(&tile.id.to_string())),
                _ => Ok(JsValue::NULL),
            }
        })
    }

    /// Remove the selected tile, if any.
    pub fn remove_selected(&self) -> Result<(), JsValue> {
        let action = {
            let mut core = self.core.borrow_mut();
            match core.selection() {
                Some(id) => core.remove(&id),
                None => return Ok(()),
            }
        };
        self.apply(&[action, Action::RenderNeeded])
    }

    /// Id of the selected tile.
    pub fn selected_id(&self) -> Option<String> {
        self.core.borrow().selection().map(|id| id.to_string())
    }

    /// All tiles as a JSON array.
    pub fn tiles_json(&self) -> Result<String, JsValue> {
        let core = self.core.borrow();
        let tiles: Vec<_> = core.tiles.iter().collect();
        serde_json::to_string(&tiles).map_err(to_js)
    }

    /// Remeasure after the canvas's layout size changed.
    pub fn resize_to(&self, width: f64, height: f64) {
        let bounds = ParentBounds::new(width, height);
        self.core.borrow_mut().set_bounds(bounds);
        self.sync_canvas_size(bounds);
    }

    pub fn pointer_down(&self, x: f64, y: f64, button: i16) -> Result<(), JsValue> {
        let actions = self.core.borrow_mut().on_pointer_down(Point::new(x, y), map_button(button));
        self.apply(&actions)
    }

    pub fn pointer_move(&self, x: f64, y: f64) -> Result<(), JsValue> {
        let actions = self.core.borrow_mut().on_pointer_move(Point::new(x, y));
        self.apply(&actions)
    }

    pub fn pointer_up(&self, x: f64, y: f64, button: i16) -> Result<(), JsValue> {
        let actions = self.core.borrow_mut().on_pointer_up(Point::new(x, y), map_button(button));
        self.apply(&actions)
    }

    /// Draw the current state to the canvas.
    pub fn render(&self) -> Result<(), JsValue> {
        let ops = scene(&self.core.borrow());
        for op in &ops {
            self.draw(op)?;
        }
        Ok(())
    }
}

impl WebBoard {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sync_canvas_size(&self, bounds: ParentBounds) {
        self.canvas.set_width(bounds.width.max(0.0) as u32);
        self.canvas.set_height(bounds.height.max(0.0) as u32);
    }

    fn apply(&self, actions: &[Action]) -> Result<(), JsValue> {
        for action in actions {
            match action {
                Action::SetCursor(cursor) => self.canvas.style().set_property("cursor", cursor)?,
                Action::RenderNeeded => self.render()?,
                _ => {}
            }
        }
        Ok(())
    }

    fn image(&self, url: &str) -> Result<HtmlImageElement, JsValue> {
        let mut images = self.images.borrow_mut();
        if let Some(img) = images.get(url) {
            return Ok(img.clone());
        }
        let img = HtmlImageElement::new()?;
        img.set_src(url);
        images.insert(url.to_string(), img.clone());
        Ok(img)
    }

    fn draw(&self, op: &DrawOp) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match op {
            DrawOp::Background { width, height, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(0.0, 0.0, *width, *height);
            }
            DrawOp::Tile { rect, color, photo, fit, .. } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(rect.left, rect.top, rect.width, rect.height);

                let img = self.image(photo)?;
                if img.complete() && img.natural_width() > 0 {
                    let placement = fit_image(
                        *fit,
                        f64::from(img.natural_width()),
                        f64::from(img.natural_height()),
                        *rect,
                    );
                    if let Some(p) = placement {
                        ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            &img, p.src.left, p.src.top, p.src.width, p.src.height, p.dest.left, p.dest.top,
                            p.dest.width, p.dest.height,
                        )?;
                    }
                }
            }
            DrawOp::SelectionOutline { rect, color } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(1.0);
                ctx.stroke_rect(rect.left, rect.top, rect.width, rect.height);
            }
            DrawOp::Handle { rect, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(rect.left, rect.top, rect.width, rect.height);
            }
            DrawOp::DeleteButton { rect, color, label } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(rect.left, rect.top, rect.width, rect.height);
                ctx.set_fill_style_str("white");
                ctx.set_font("12px sans-serif");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.fill_text(label, rect.left + rect.width / 2.0, rect.top + rect.height / 2.0)?;
            }
        }
        Ok(())
    }
}
