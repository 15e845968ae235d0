//! # `LiveCanvas` Core
//!
//! Engine for a layered, direct-manipulation 2D canvas editor. The host
//! owns rendering and gesture recognition; this crate owns the model:
//! which layers exist, where they are, which one is selected, and what a
//! drag does to them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              livecanvas-core                │
//! ├─────────────────────────────────────────────┤
//! │  Scene Store     │  Controllers             │
//! │  - Paint order   │  - Tap select            │
//! │  - Selection     │  - Drag move             │
//! │  - Undo/redo     │  - Corner resize         │
//! │  - Import/export │  - Crop window           │
//! ├─────────────────────────────────────────────┤
//! │  Layout          │  Geometry                │
//! │  - Initial size  │  - Points, rects         │
//! │  - Fit/fill      │  - Canvas clamping       │
//! │  - Measurement   │  - Normalization         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Layer content is an opaque type parameter: the engine positions,
//! orders, and crops layers without knowing what they draw. Hosts repaint
//! whenever [`Scene::revision`] changes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod controller;
pub mod error;
pub mod event;
pub mod geometry;
pub mod layer;
pub mod layout;
pub mod scene;

pub use controller::{tap, CropController, MoveController, ResizeController};
pub use error::{CanvasError, CanvasResult};
pub use event::{PointerEvent, PointerPhase};
pub use geometry::{Point, Rect, Size};
pub use layer::{InitialSize, Layer, LayerId, ResizeMode, MIN_LAYER_SIZE};
pub use layout::initial_frame;
pub use scene::{Alignment, CoordinateSpace, Position, Scene, ZOrder};

/// Canvas engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
