//! # `LiveCanvas` Renderer
//!
//! CPU snapshot renderer for `LiveCanvas` scenes. Flattens a layered scene
//! into a single bitmap and encodes it for transport.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   LayerRasterizer   ┌───────────────┐   encode    ┌───────────┐
//! │ Scene<C>     │ ──────────────────► │ SceneRenderer │ ──────────► │ PNG/JPEG  │
//! │ (paint order)│   host pixels       │ (tiny-skia)   │   bytes     │           │
//! └──────────────┘                     └───────────────┘             └───────────┘
//! ```
//!
//! The renderer never interprets layer content itself: a host-supplied
//! [`LayerRasterizer`] turns each layer into pixels, and the renderer
//! handles placement, scaling, crop masks, and paint order. Because a
//! snapshot is an ordinary [`Pixmap`], it can be fed back in as new layer
//! content for nested scenes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod encode;
pub mod error;
pub mod snapshot;

pub use encode::{encode_jpeg, encode_png};
pub use error::{RenderError, RenderResult};
pub use snapshot::{LayerRasterizer, RenderOptions, SceneRenderer};

pub use tiny_skia::Pixmap;

/// Renderer version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
