//! The layer store: paint order, selection, z-order, alignment, history,
//! and layer-list import/export.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{Point, Size};
use crate::layer::{Layer, LayerId};

/// Where a new layer lands in the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Topmost (painted last).
    Front,
    /// Bottommost (painted first).
    Back,
    /// At a specific paint-order index, clamped to the valid range.
    At(usize),
}

/// A z-order change for an existing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    /// Swap with the neighbor just above.
    Up,
    /// Swap with the neighbor just below.
    Down,
    /// Make topmost.
    ToFront,
    /// Make bottommost.
    ToBack,
    /// Move to a specific index, clamped to the valid range.
    ToIndex(usize),
}

/// Edge or center alignment of a layer against the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Flush with the left edge.
    Left,
    /// Flush with the right edge.
    Right,
    /// Flush with the top edge.
    Top,
    /// Flush with the bottom edge.
    Bottom,
    /// Centered on the horizontal axis.
    CenterHorizontal,
    /// Centered on the vertical axis.
    CenterVertical,
    /// Centered on both axes.
    Center,
}

/// Coordinate space of an imported or exported layer list.
///
/// `Relative` frames live in the unit interval and survive canvas resizes;
/// they are converted to absolute coordinates when the canvas size first
/// becomes known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSpace {
    /// Canvas units.
    Absolute,
    /// Unit-interval fractions of the canvas size.
    Relative,
}

/// One history entry: a deep copy of the ordered layer list, tagged with
/// whether it was captured before a relative-coordinate import had been
/// resolved. Restoring such an entry re-runs resolution against the
/// current canvas size.
#[derive(Debug, Clone)]
struct HistoryEntry<C> {
    layers: Vec<Layer<C>>,
    pending_relative: bool,
}

/// Ordered collection of layers with selection and undo/redo history.
///
/// Layers live in an id-keyed map; a separate index list holds the
/// back-to-front paint order (index 0 is bottommost). History entries are
/// deep copies of the ordered layer list, pushed *before* each mutating
/// operation, so one undo steps back exactly one operation.
#[derive(Debug, Clone)]
pub struct Scene<C> {
    layers: HashMap<LayerId, Layer<C>>,
    order: Vec<LayerId>,
    selected: Option<LayerId>,
    undo_stack: Vec<HistoryEntry<C>>,
    redo_stack: Vec<HistoryEntry<C>>,
    canvas_size: Option<Size>,
    pending_relative: bool,
    revision: u64,
}

impl<C> Scene<C> {
    /// Create an empty scene. The canvas size is unknown until the host
    /// reports it via [`set_canvas_size`](Self::set_canvas_size).
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: HashMap::new(),
            order: Vec::new(),
            selected: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            canvas_size: None,
            pending_relative: false,
            revision: 0,
        }
    }

    /// Create a scene from a saved layer list, bottommost first.
    ///
    /// Layers imported in [`CoordinateSpace::Relative`] keep their
    /// unit-interval frames until the first canvas size arrives, at which
    /// point every frame and crop window is scaled up exactly once.
    #[must_use]
    pub fn with_layers(list: Vec<Layer<C>>, space: CoordinateSpace) -> Self {
        let mut scene = Self::new();
        scene.pending_relative = space == CoordinateSpace::Relative;
        for layer in list {
            let id = layer.id();
            if scene.layers.insert(id, layer).is_none() {
                scene.order.push(id);
            } else {
                warn!(%id, "duplicate layer id in imported list; keeping the later entry");
            }
        }
        scene
    }

    /// Record the canvas viewport size.
    ///
    /// Degenerate sizes are ignored. The first valid size resolves any
    /// pending relative-coordinate import.
    pub fn set_canvas_size(&mut self, size: Size) {
        if size.is_degenerate() {
            warn!(?size, "ignoring degenerate canvas size");
            return;
        }
        self.canvas_size = Some(size);
        self.resolve_pending_relative();
        self.touch();
    }

    /// The last reported canvas size, if any.
    #[must_use]
    pub const fn canvas_size(&self) -> Option<Size> {
        self.canvas_size
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the scene holds no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Layers in paint order, bottommost first.
    pub fn layers(&self) -> impl Iterator<Item = &Layer<C>> {
        self.order.iter().filter_map(|id| self.layers.get(id))
    }

    /// Paint-order index of a layer.
    #[must_use]
    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.order.iter().position(|other| *other == id)
    }

    /// Borrow a layer by id.
    #[must_use]
    pub fn get(&self, id: LayerId) -> Option<&Layer<C>> {
        self.layers.get(&id)
    }

    /// Mutate a layer in place. Returns `false` for an unknown id.
    ///
    /// This is the only mutable access path. It does *not* record history;
    /// callers group edits into user-visible operations with
    /// [`undo_checkpoint`](Self::undo_checkpoint).
    pub fn mutate(&mut self, id: LayerId, f: impl FnOnce(&mut Layer<C>)) -> bool {
        if let Some(layer) = self.layers.get_mut(&id) {
            f(layer);
            self.touch();
            true
        } else {
            warn!(%id, "mutate skipped: unknown layer");
            false
        }
    }

    /// Change the selection. `None` clears it; an unknown or unselectable
    /// id also clears it rather than leaving a stale reference behind.
    pub fn select(&mut self, id: Option<LayerId>) {
        let next = id.filter(|id| self.layers.get(id).is_some_and(|layer| layer.selectable));
        if id.is_some() && next.is_none() {
            warn!("selection cleared: layer unknown or not selectable");
        }
        if self.selected != next {
            self.selected = next;
            self.touch();
        }
    }

    /// Id of the selected layer, if any.
    #[must_use]
    pub const fn selected_id(&self) -> Option<LayerId> {
        self.selected
    }

    /// Borrow the selected layer, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Layer<C>> {
        self.selected.and_then(|id| self.layers.get(&id))
    }

    /// Topmost selectable layer whose hit rectangle contains `location`.
    ///
    /// Hit rectangles are floored at [`MIN_LAYER_SIZE`](crate::MIN_LAYER_SIZE)
    /// so tiny layers stay tappable.
    #[must_use]
    pub fn hit_test(&self, location: Point) -> Option<LayerId> {
        self.order.iter().rev().find_map(|id| {
            let layer = self.layers.get(id)?;
            (layer.selectable && layer.hit_frame().is_some_and(|frame| frame.contains(location)))
                .then_some(*id)
        })
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Change counter, bumped on every observable mutation. Hosts compare
    /// it between frames to decide whether to repaint.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Scale every frame and crop window out of the unit interval, once,
    /// if an unresolved relative import is waiting and the canvas size is
    /// known.
    fn resolve_pending_relative(&mut self) {
        if !self.pending_relative {
            return;
        }
        let Some(size) = self.canvas_size else {
            return;
        };
        self.pending_relative = false;
        for id in &self.order {
            if let Some(layer) = self.layers.get_mut(id) {
                layer.frame = layer.frame.map(|frame| frame.denormalized(size));
                layer.clip_frame = layer.clip_frame.map(|clip| clip.denormalized(size));
            }
        }
        debug!(count = self.order.len(), "resolved relative layer frames");
    }

    fn restore(&mut self, entry: HistoryEntry<C>) {
        self.layers.clear();
        self.order.clear();
        for layer in entry.layers {
            let id = layer.id();
            self.layers.insert(id, layer);
            self.order.push(id);
        }
        self.pending_relative = entry.pending_relative;
        self.selected = None;
        self.resolve_pending_relative();
        self.touch();
    }
}

impl<C: Clone> Scene<C> {
    /// Add a layer and return its id.
    ///
    /// Records an undo step, inserts at `position` (`At` clamps), and
    /// selects the new layer if it is selectable.
    pub fn add(&mut self, layer: Layer<C>, position: Position) -> LayerId {
        self.undo_checkpoint();
        let id = layer.id();
        let selectable = layer.selectable;
        self.layers.insert(id, layer);
        let index = match position {
            Position::Front => self.order.len(),
            Position::Back => 0,
            Position::At(index) => index.min(self.order.len()),
        };
        self.order.insert(index, id);
        if selectable {
            self.selected = Some(id);
        }
        debug!(%id, ?position, "added layer");
        self.touch();
        id
    }

    /// Remove a layer, returning it. Unknown ids are a no-op returning
    /// `None` without recording history.
    pub fn remove(&mut self, id: LayerId) -> Option<Layer<C>> {
        if !self.layers.contains_key(&id) {
            warn!(%id, "remove skipped: unknown layer");
            return None;
        }
        self.undo_checkpoint();
        self.order.retain(|other| *other != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        let layer = self.layers.remove(&id);
        debug!(%id, "removed layer");
        self.touch();
        layer
    }

    /// Reorder a layer in the paint stack. Ids stay stable across moves.
    ///
    /// Unknown ids are a no-op. A move that would push past the stack
    /// boundary leaves the order unchanged and returns `false`.
    pub fn move_layer(&mut self, id: LayerId, z_order: ZOrder) -> bool {
        let Some(from) = self.index_of(id) else {
            warn!(%id, "move skipped: unknown layer");
            return false;
        };
        self.undo_checkpoint();
        let top = self.order.len() - 1;
        let to = match z_order {
            ZOrder::Up => (from + 1).min(top),
            ZOrder::Down => from.saturating_sub(1),
            ZOrder::ToFront => top,
            ZOrder::ToBack => 0,
            ZOrder::ToIndex(index) => {
                if index > top {
                    debug!(%id, ?z_order, "move skipped: index out of range");
                    return false;
                }
                index
            }
        };
        if from == to {
            debug!(%id, ?z_order, "z-order unchanged");
            return false;
        }
        let moved = self.order.remove(from);
        self.order.insert(to, moved);
        debug!(%id, from, to, "moved layer");
        self.touch();
        true
    }

    /// Snap a layer's frame to a canvas edge or center line.
    ///
    /// A crop window travels with the frame. No-op without a canvas size,
    /// for an unknown id, or while the frame is unresolved.
    pub fn align(&mut self, id: LayerId, alignment: Alignment) -> bool {
        let Some(canvas) = self.canvas_size else {
            warn!(%id, "align skipped: canvas size unknown");
            return false;
        };
        let Some(frame) = self.layers.get(&id).and_then(|layer| layer.frame) else {
            warn!(%id, "align skipped: unknown layer or unresolved frame");
            return false;
        };
        self.undo_checkpoint();
        let mut origin = frame.origin;
        match alignment {
            Alignment::Left => origin.x = 0.0,
            Alignment::Right => origin.x = canvas.width - frame.size.width,
            Alignment::Top => origin.y = 0.0,
            Alignment::Bottom => origin.y = canvas.height - frame.size.height,
            Alignment::CenterHorizontal => {
                origin.x = (canvas.width - frame.size.width) / 2.0;
            }
            Alignment::CenterVertical => {
                origin.y = (canvas.height - frame.size.height) / 2.0;
            }
            Alignment::Center => {
                origin.x = (canvas.width - frame.size.width) / 2.0;
                origin.y = (canvas.height - frame.size.height) / 2.0;
            }
        }
        let delta = origin - frame.origin;
        self.mutate(id, |layer| {
            if let Some(frame) = layer.frame.as_mut() {
                frame.origin = origin;
            }
            layer.clip_frame = layer.clip_frame.map(|clip| clip.offset_by(delta));
        });
        debug!(%id, ?alignment, "aligned layer");
        true
    }

    fn history_entry(&self) -> HistoryEntry<C> {
        HistoryEntry {
            layers: self.snapshot_layers(),
            pending_relative: self.pending_relative,
        }
    }

    /// Push the current layer list onto the undo stack and clear the redo
    /// stack.
    ///
    /// Mutating operations call this themselves; hosts call it before
    /// editing layer content out of band (e.g. retyping a text layer) so
    /// the edit becomes undoable.
    pub fn undo_checkpoint(&mut self) {
        self.undo_stack.push(self.history_entry());
        self.redo_stack.clear();
    }

    /// Step back one operation. Returns `false` when the history is empty.
    ///
    /// The selection is cleared: the selected layer may not exist in the
    /// restored state. A step captured before a relative import was
    /// resolved comes back in pixels, scaled by the current canvas size.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            debug!("undo skipped: history empty");
            return false;
        };
        self.redo_stack.push(self.history_entry());
        self.restore(previous);
        debug!("undo applied");
        true
    }

    /// Step forward one undone operation. Returns `false` when there is
    /// nothing to redo. Clears the selection like [`undo`](Self::undo).
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            debug!("redo skipped: history empty");
            return false;
        };
        self.undo_stack.push(self.history_entry());
        self.restore(next);
        debug!("redo applied");
        true
    }

    /// Deep copy of the layer list in paint order.
    #[must_use]
    pub fn snapshot_layers(&self) -> Vec<Layer<C>> {
        self.order
            .iter()
            .filter_map(|id| self.layers.get(id).cloned())
            .collect()
    }

    /// The layer list with frames and crop windows mapped into the unit
    /// interval. `None` until the canvas size is known.
    #[must_use]
    pub fn normalized_layers(&self) -> Option<Vec<Layer<C>>> {
        let canvas = self.canvas_size?;
        let mut list = self.snapshot_layers();
        for layer in &mut list {
            layer.frame = layer.frame.map(|frame| frame.normalized(canvas));
            layer.clip_frame = layer.clip_frame.map(|clip| clip.normalized(canvas));
        }
        Some(list)
    }

    /// Serialize the layer list to JSON in the requested coordinate space.
    ///
    /// # Errors
    ///
    /// [`CanvasError::CanvasSizeUnknown`] when a relative export is asked
    /// for before the canvas size is known, or
    /// [`CanvasError::Serialization`] if the content fails to serialize.
    pub fn to_json(&self, space: CoordinateSpace) -> CanvasResult<String>
    where
        C: Serialize,
    {
        let list = match space {
            CoordinateSpace::Absolute => self.snapshot_layers(),
            CoordinateSpace::Relative => self
                .normalized_layers()
                .ok_or(CanvasError::CanvasSizeUnknown)?,
        };
        Ok(serde_json::to_string(&list)?)
    }

    /// Build a scene from a JSON layer list produced by
    /// [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// [`CanvasError::Serialization`] if the JSON does not parse as a
    /// layer list.
    pub fn from_json(json: &str, space: CoordinateSpace) -> CanvasResult<Self>
    where
        C: DeserializeOwned,
    {
        let list: Vec<Layer<C>> = serde_json::from_str(json)?;
        Ok(Self::with_layers(list, space))
    }
}

impl<C> Default for Scene<C> {
    fn default() -> Self {
        Self::new()
    }
}
