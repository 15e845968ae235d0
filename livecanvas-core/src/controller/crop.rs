//! Crop-window editing.

use tracing::warn;

use crate::event::PointerEvent;
use crate::geometry::{Point, Rect, Size};
use crate::layer::{LayerId, MIN_LAYER_SIZE};
use crate::scene::Scene;

/// Edits one layer's crop window through two drag regions: the window
/// body translates it, the bottom-right corner resizes it.
///
/// A layer without a crop window gets one covering the whole frame on the
/// first sample, so the gesture always has a concrete rectangle to work
/// against. The window never leaves the content frame: translation clamps
/// the origin and resizing caps the extent at the frame's far corner (the
/// cap wins over the minimum size when the window sits against an edge).
#[derive(Debug, Clone)]
pub struct CropController {
    layer: LayerId,
    grab_offset: Option<Point>,
    resize_active: bool,
}

impl CropController {
    /// Controller for the given layer.
    #[must_use]
    pub const fn new(layer: LayerId) -> Self {
        Self {
            layer,
            grab_offset: None,
            resize_active: false,
        }
    }

    /// Feed one pointer sample from the window-body drag region,
    /// translating the crop window inside the frame. Returns whether the
    /// scene changed.
    pub fn handle_move<C: Clone>(&mut self, scene: &mut Scene<C>, event: PointerEvent) -> bool {
        if event.phase.is_terminal() {
            self.grab_offset = None;
            return false;
        }
        let Some((canvas, frame, clip)) = self.sample_state(scene) else {
            return false;
        };

        let grab = if let Some(grab) = self.grab_offset {
            grab
        } else {
            scene.undo_checkpoint();
            let grab = event.location - clip.origin;
            self.grab_offset = Some(grab);
            grab
        };

        let desired = event.location.clamped(canvas) - grab;
        let origin = Point::new(
            desired
                .x
                .min(frame.max_x() - clip.size.width)
                .max(frame.origin.x),
            desired
                .y
                .min(frame.max_y() - clip.size.height)
                .max(frame.origin.y),
        );
        scene.mutate(self.layer, move |layer| {
            layer.clip_frame = Some(Rect::from_parts(origin, clip.size));
        })
    }

    /// Feed one pointer sample from the corner drag region, resizing the
    /// crop window toward the pointer. Returns whether the scene changed.
    pub fn handle_resize<C: Clone>(&mut self, scene: &mut Scene<C>, event: PointerEvent) -> bool {
        if event.phase.is_terminal() {
            self.resize_active = false;
            return false;
        }
        let Some((canvas, frame, clip)) = self.sample_state(scene) else {
            return false;
        };

        if !self.resize_active {
            scene.undo_checkpoint();
            self.resize_active = true;
        }

        let extent = event.location.clamped(canvas) - clip.origin;
        let size = Size::new(
            extent
                .x
                .max(MIN_LAYER_SIZE.width)
                .min(frame.max_x() - clip.origin.x),
            extent
                .y
                .max(MIN_LAYER_SIZE.height)
                .min(frame.max_y() - clip.origin.y),
        );
        scene.mutate(self.layer, move |layer| {
            layer.clip_frame = Some(Rect::from_parts(clip.origin, size));
        })
    }

    /// Canvas size, frame, and effective crop window for one sample, or
    /// `None` when the sample must be ignored.
    fn sample_state<C>(&self, scene: &Scene<C>) -> Option<(Size, Rect, Rect)> {
        let canvas = scene.canvas_size()?;
        let Some(layer) = scene.get(self.layer) else {
            warn!(layer = %self.layer, "crop sample dropped: unknown layer");
            return None;
        };
        let frame = layer.frame?;
        let clip = layer.clip_frame.unwrap_or(frame);
        Some((canvas, frame, clip))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use crate::layer::Layer;
    use crate::scene::Position;

    fn photo_scene() -> (Scene<&'static str>, LayerId) {
        let mut scene = Scene::new();
        scene.set_canvas_size(Size::new(200.0, 200.0));
        let id = scene.add(
            Layer::new("photo")
                .with_frame(Rect::new(20.0, 20.0, 100.0, 60.0))
                .with_clip_frame(Rect::new(40.0, 30.0, 30.0, 20.0)),
            Position::Front,
        );
        (scene, id)
    }

    fn clip_of(scene: &Scene<&'static str>, id: LayerId) -> Rect {
        scene.get(id).and_then(|layer| layer.clip_frame).unwrap()
    }

    #[test]
    fn test_move_translates_the_window() {
        let (mut scene, id) = photo_scene();
        let mut controller = CropController::new(id);

        controller.handle_move(&mut scene, PointerEvent::start(Point::new(50.0, 40.0)));
        controller.handle_move(&mut scene, PointerEvent::moved(Point::new(60.0, 45.0)));
        assert_eq!(clip_of(&scene, id), Rect::new(50.0, 35.0, 30.0, 20.0));
    }

    #[test]
    fn test_window_cannot_leave_the_frame() {
        let (mut scene, id) = photo_scene();
        let mut controller = CropController::new(id);

        controller.handle_move(&mut scene, PointerEvent::start(Point::new(50.0, 40.0)));
        controller.handle_move(&mut scene, PointerEvent::moved(Point::new(190.0, 190.0)));
        // Pinned to the frame's bottom-right, window size unchanged.
        assert_eq!(clip_of(&scene, id), Rect::new(90.0, 60.0, 30.0, 20.0));

        controller.handle_move(&mut scene, PointerEvent::moved(Point::new(0.0, 0.0)));
        assert_eq!(clip_of(&scene, id), Rect::new(20.0, 20.0, 30.0, 20.0));
    }

    #[test]
    fn test_resize_grows_toward_the_pointer() {
        let (mut scene, id) = photo_scene();
        let mut controller = CropController::new(id);

        controller.handle_resize(&mut scene, PointerEvent::start(Point::new(70.0, 50.0)));
        controller.handle_resize(&mut scene, PointerEvent::moved(Point::new(90.0, 70.0)));
        assert_eq!(clip_of(&scene, id), Rect::new(40.0, 30.0, 50.0, 40.0));
    }

    #[test]
    fn test_resize_floors_at_minimum_and_caps_at_the_frame() {
        let (mut scene, id) = photo_scene();
        let mut controller = CropController::new(id);

        controller.handle_resize(&mut scene, PointerEvent::start(Point::new(70.0, 50.0)));
        controller.handle_resize(&mut scene, PointerEvent::moved(Point::new(41.0, 31.0)));
        assert_eq!(clip_of(&scene, id).size, MIN_LAYER_SIZE);

        controller.handle_resize(&mut scene, PointerEvent::moved(Point::new(200.0, 200.0)));
        // Capped at the frame's far corner: (120, 80) - (40, 30).
        assert_eq!(clip_of(&scene, id).size, Size::new(80.0, 50.0));
    }

    #[test]
    fn test_uncropped_layer_gets_a_full_frame_window() {
        let mut scene = Scene::new();
        scene.set_canvas_size(Size::new(200.0, 200.0));
        let id = scene.add(
            Layer::new("photo").with_frame(Rect::new(10.0, 10.0, 60.0, 40.0)),
            Position::Front,
        );
        let mut controller = CropController::new(id);

        controller.handle_move(&mut scene, PointerEvent::start(Point::new(30.0, 30.0)));
        assert_eq!(clip_of(&scene, id), Rect::new(10.0, 10.0, 60.0, 40.0));
    }

    #[test]
    fn test_each_region_records_one_undo_step() {
        let (mut scene, id) = photo_scene();
        let mut controller = CropController::new(id);

        controller.handle_move(&mut scene, PointerEvent::start(Point::new(50.0, 40.0)));
        controller.handle_move(&mut scene, PointerEvent::moved(Point::new(55.0, 40.0)));
        controller.handle_move(&mut scene, PointerEvent::end(Point::new(55.0, 40.0)));

        controller.handle_resize(&mut scene, PointerEvent::start(Point::new(75.0, 50.0)));
        controller.handle_resize(&mut scene, PointerEvent::moved(Point::new(95.0, 60.0)));
        controller.handle_resize(&mut scene, PointerEvent::end(Point::new(95.0, 60.0)));

        assert!(scene.undo());
        assert_eq!(clip_of(&scene, id), Rect::new(45.0, 30.0, 30.0, 20.0));
        assert!(scene.undo());
        assert_eq!(clip_of(&scene, id), Rect::new(40.0, 30.0, 30.0, 20.0));
    }
}
