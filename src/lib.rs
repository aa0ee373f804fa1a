//! Element and drag engine for the portfolio-page builder.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editing session behind the page canvas: the ordered set of placed elements,
//! the current selection, the canvas extents, and the pointer-drag state
//! machine that moves elements around. The host JavaScript layer paints the
//! page and forwards DOM events; everything it needs to repaint comes back as
//! [`engine::Action`]s or as a [`engine::Snapshot`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session-owning [`engine::EngineCore`] and the actions it emits |
//! | [`doc`] | Element types and the [`doc::ElementStore`] |
//! | [`input`] | Pointer buttons and the drag state machine |
//! | [`bounds`] | Position clamping against the canvas extents |
//! | [`geom`] | Points, sizes, and client-to-canvas coordinate conversion |
//! | [`hit`] | Hit-testing elements and their on-canvas controls |
//! | [`palette`] | Named element presets offered by the component library |
//! | [`format`] | Text alignment and font toggles for text elements |
//! | [`config`] | Session configuration (initial canvas extents) |
//! | [`bindings`] | `wasm-bindgen` facade for the host page |
//! | [`consts`] | Shared numeric and string constants |

pub mod bindings;
pub mod bounds;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod format;
pub mod geom;
pub mod hit;
pub mod input;
pub mod palette;
