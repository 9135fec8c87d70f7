//! Core engine for the spec card editor.
//!
//! This crate is compiled to WebAssembly for the browser client and linked
//! natively by the command-line tool. It owns the field store, the
//! persistence port, drag-reorder handling, the card layout projection, and
//! the renderers that turn a projection into pixels or SVG. Hosts (the Leptos
//! client, the CLI) only wire their input surface and storage backend to
//! [`engine::EditorCore`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EditorCore`]: store + persistence + observers |
//! | [`doc`] | Field records, card settings, and the ordered field store |
//! | [`persist`] | Key-value persistence port, load/save, migration |
//! | [`reorder`] | Drag gesture state machine and closest-center targeting |
//! | [`layout`] | Pure projection from a document to card geometry |
//! | [`render`] | Paints a layout onto a `Canvas2D` context |
//! | [`svg`] | Writes a layout as a standalone SVG document |
//! | [`export`] | Raster export planning and error types |
//! | [`color`] | Hex color parsing and normalization |
//! | [`consts`] | Shared defaults (colors, metrics, storage keys) |

pub mod color;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod export;
pub mod layout;
pub mod persist;
pub mod render;
pub mod reorder;
pub mod svg;
