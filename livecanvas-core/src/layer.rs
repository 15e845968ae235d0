//! Layers - the placed items that make up a scene.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Rect, Size};

/// Minimum layer extent in canvas units.
///
/// Resize gestures floor width and height here, and the tap hit-test grows
/// rectangles to at least this size so near-zero layers stay tappable.
pub const MIN_LAYER_SIZE: Size = Size {
    width: 20.0,
    height: 20.0,
};

/// Unique identifier for a layer.
///
/// Assigned at construction and never reused; stable across z-order changes,
/// so hosts can keep one around (e.g. for a background layer) indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Create a new unique layer ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a layer's first frame is computed when it has none.
///
/// Resolved exactly once, by [`Scene::resolve_layout`](crate::Scene::resolve_layout);
/// after that the stored frame is authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum InitialSize {
    /// Cover the whole canvas.
    Fill,
    /// Scale the measured content uniformly to fit within the given size,
    /// preserving aspect ratio, then center it.
    Fit(Size),
    /// Use exactly this size, centered.
    Fixed(Size),
    /// Use the content's measured natural size, centered.
    #[default]
    Intrinsic,
}

/// Whether and how a layer may be resized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Width and height change independently.
    #[default]
    Free,
    /// The frame's aspect ratio is preserved.
    Proportional,
    /// The layer cannot be resized; hosts must not attach a resize
    /// controller to it.
    Disabled,
}

/// One placed item on the canvas.
///
/// `C` is the host's content tag - the engine never inspects it beyond
/// handing it back to the host's renderer and measurer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer<C> {
    id: LayerId,
    /// Opaque, application-defined content.
    pub content: C,
    /// Bounding rectangle in canvas coordinates; `None` until the first
    /// layout pass resolves it from [`InitialSize`].
    pub frame: Option<Rect>,
    /// Optional crop window. Rendering shows only the portion of the content
    /// inside this rectangle, while `frame` keeps describing the full
    /// (uncropped) content bounds.
    pub clip_frame: Option<Rect>,
    /// Sizing policy for the first layout pass.
    pub initial_size: InitialSize,
    /// Whether taps can select this layer.
    pub selectable: bool,
    /// Whether drags can move this layer.
    pub movable: bool,
    /// Resize policy.
    pub resize: ResizeMode,
}

impl<C> Layer<C> {
    /// Create a layer with the default interaction policy: selectable,
    /// movable, freely resizable, intrinsically sized.
    #[must_use]
    pub fn new(content: C) -> Self {
        Self {
            id: LayerId::new(),
            content,
            frame: None,
            clip_frame: None,
            initial_size: InitialSize::default(),
            selectable: true,
            movable: true,
            resize: ResizeMode::default(),
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> LayerId {
        self.id
    }

    /// Set the sizing policy.
    #[must_use]
    pub fn with_initial_size(mut self, initial_size: InitialSize) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// Set the frame up front, bypassing initial layout (used when importing
    /// a saved layer list).
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Set a crop window.
    #[must_use]
    pub fn with_clip_frame(mut self, clip_frame: Rect) -> Self {
        self.clip_frame = Some(clip_frame);
        self
    }

    /// Set whether taps can select this layer.
    #[must_use]
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set whether drags can move this layer.
    #[must_use]
    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    /// Set the resize policy.
    #[must_use]
    pub fn with_resize(mut self, resize: ResizeMode) -> Self {
        self.resize = resize;
        self
    }

    /// The rectangle the layer presents on screen: the crop window when one
    /// is set, the frame otherwise. `None` until laid out.
    #[must_use]
    pub fn presented_frame(&self) -> Option<Rect> {
        self.clip_frame.or(self.frame)
    }

    /// The tap hit-test rectangle: the presented frame grown about its
    /// center to at least [`MIN_LAYER_SIZE`].
    #[must_use]
    pub fn hit_frame(&self) -> Option<Rect> {
        self.presented_frame()
            .map(|frame| frame.expanded_to(MIN_LAYER_SIZE))
    }
}
