//! Drag-to-move.

use tracing::warn;

use crate::event::PointerEvent;
use crate::geometry::Point;
use crate::layer::LayerId;
use crate::scene::Scene;

/// Moves one layer by dragging.
///
/// The offset between the finger and the frame origin is captured on the
/// first sample, before any clamping, so the layer tracks the finger
/// instead of snapping its origin to it. Pointer locations are clamped to
/// the canvas; the frame itself may hang past the edge as long as the
/// finger stays inside.
#[derive(Debug, Clone)]
pub struct MoveController {
    layer: LayerId,
    grab_offset: Option<Point>,
}

impl MoveController {
    /// Controller for the given layer.
    #[must_use]
    pub const fn new(layer: LayerId) -> Self {
        Self {
            layer,
            grab_offset: None,
        }
    }

    /// Feed one pointer sample. Returns whether the scene changed.
    ///
    /// Samples are ignored until the canvas size is known, when the layer
    /// is missing or not movable, or while its frame is unresolved. A crop
    /// window travels with the frame.
    pub fn handle<C: Clone>(&mut self, scene: &mut Scene<C>, event: PointerEvent) -> bool {
        if event.phase.is_terminal() {
            self.grab_offset = None;
            return false;
        }
        let Some(canvas) = scene.canvas_size() else {
            return false;
        };
        let Some(layer) = scene.get(self.layer) else {
            warn!(layer = %self.layer, "move sample dropped: unknown layer");
            return false;
        };
        if !layer.movable {
            return false;
        }
        let Some(frame) = layer.frame else {
            return false;
        };

        let grab = if let Some(grab) = self.grab_offset {
            grab
        } else {
            scene.undo_checkpoint();
            let grab = event.location - frame.origin;
            self.grab_offset = Some(grab);
            grab
        };

        let origin = event.location.clamped(canvas) - grab;
        let delta = origin - frame.origin;
        scene.mutate(self.layer, move |layer| {
            if let Some(frame) = layer.frame.as_mut() {
                frame.origin = origin;
            }
            layer.clip_frame = layer.clip_frame.map(|clip| clip.offset_by(delta));
        })
    }
}
