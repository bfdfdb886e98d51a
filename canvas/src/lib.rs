//! Photo tile canvas: state, clamping and input engine.
//!
//! Users add photo tiles onto a black canvas, select one, and drag or resize
//! it inside the canvas bounds. This crate owns all of that logic and is
//! compiled both natively (for the terminal host and tests) and to
//! WebAssembly, where the [`web`] module binds it to a `<canvas>` element.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Tile collection controller and pointer gestures ([`engine::EngineCore`]) |
//! | [`doc`] | Tile types and the copy-on-write [`doc::TileList`] |
//! | [`bounds`] | Drag and resize clamping against the parent rectangle |
//! | [`input`] | Pointer types, gesture state machine, drag/resize proposals |
//! | [`hit`] | Hit-testing tiles, handles and the delete button |
//! | [`render`] | Display-list building and image fitting |
//! | [`photo`] | Photo listing client with retry and fallback |
//! | [`ids`] | Injected id and random-choice sources |
//! | [`consts`] | Shared numeric constants (sizes, hit slop, colors) |

pub mod bounds;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod ids;
pub mod input;
pub mod photo;
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod web;
