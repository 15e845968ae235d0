//! Drag-to-resize.

use tracing::warn;

use crate::event::PointerEvent;
use crate::geometry::{Point, Rect, Size};
use crate::layer::{LayerId, ResizeMode, MIN_LAYER_SIZE};
use crate::scene::Scene;

/// Resizes one layer by dragging its bottom-right corner.
///
/// The frame and crop window at gesture start are captured on the first
/// sample; every later sample is computed against those, so a proportional
/// drag preserves the starting aspect ratio exactly instead of compounding
/// rounding across samples.
///
/// When the layer is cropped, the drag resizes the *crop window* and the
/// content frame is rescaled inversely about the crop origin, keeping the
/// crop's relative position and size within the content unchanged.
#[derive(Debug, Clone)]
pub struct ResizeController {
    layer: LayerId,
    initial: Option<(Rect, Option<Rect>)>,
}

impl ResizeController {
    /// Controller for the given layer.
    #[must_use]
    pub const fn new(layer: LayerId) -> Self {
        Self {
            layer,
            initial: None,
        }
    }

    /// Feed one pointer sample. Returns whether the scene changed.
    ///
    /// Samples are ignored until the canvas size is known, when the layer
    /// is missing or has [`ResizeMode::Disabled`], or while its frame is
    /// unresolved. Both axes are floored at
    /// [`MIN_LAYER_SIZE`](crate::MIN_LAYER_SIZE).
    pub fn handle<C: Clone>(&mut self, scene: &mut Scene<C>, event: PointerEvent) -> bool {
        if event.phase.is_terminal() {
            self.initial = None;
            return false;
        }
        let Some(canvas) = scene.canvas_size() else {
            return false;
        };
        let Some(layer) = scene.get(self.layer) else {
            warn!(layer = %self.layer, "resize sample dropped: unknown layer");
            return false;
        };
        let mode = layer.resize;
        if mode == ResizeMode::Disabled {
            return false;
        }
        let Some(frame) = layer.frame else {
            return false;
        };
        let clip = layer.clip_frame;

        let (initial_frame, initial_clip) = if let Some(initial) = self.initial {
            initial
        } else {
            scene.undo_checkpoint();
            self.initial = Some((frame, clip));
            (frame, clip)
        };

        let pointer = event.location.clamped(canvas);
        match initial_clip {
            Some(initial_clip) if !initial_clip.size.is_degenerate() => {
                let crop_size =
                    resized_size(mode, initial_clip.size, pointer - initial_clip.origin);
                let scale = Size::new(
                    crop_size.width / initial_clip.size.width,
                    crop_size.height / initial_clip.size.height,
                );
                let frame_size = initial_frame.size.scaled_by(scale);
                let inset = initial_clip.origin - initial_frame.origin;
                let origin = initial_clip.origin - inset.scaled_by(scale);
                scene.mutate(self.layer, move |layer| {
                    layer.frame = Some(Rect::from_parts(origin, frame_size));
                    layer.clip_frame = Some(Rect::from_parts(initial_clip.origin, crop_size));
                })
            }
            _ => {
                let size = resized_size(mode, initial_frame.size, pointer - initial_frame.origin);
                scene.mutate(self.layer, move |layer| {
                    if let Some(frame) = layer.frame.as_mut() {
                        frame.size = size;
                    }
                })
            }
        }
    }
}

/// Candidate size for a drag whose extent runs from the rect origin to the
/// pointer.
fn resized_size(mode: ResizeMode, initial: Size, extent: Point) -> Size {
    match mode {
        ResizeMode::Proportional if !initial.is_degenerate() => {
            let ratio = (extent.x / initial.width).max(extent.y / initial.height);
            let floor = (MIN_LAYER_SIZE.width / initial.width)
                .max(MIN_LAYER_SIZE.height / initial.height);
            let ratio = ratio.max(floor);
            initial.scaled_by(Size::new(ratio, ratio))
        }
        _ => Size::new(extent.x, extent.y).at_least(MIN_LAYER_SIZE),
    }
}
