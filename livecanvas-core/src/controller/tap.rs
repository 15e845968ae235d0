//! Tap-to-select.

use crate::geometry::Point;
use crate::layer::LayerId;
use crate::scene::Scene;

/// Select the topmost selectable layer under `location`, or clear the
/// selection when the tap lands on empty canvas. Returns the resulting
/// selection.
///
/// Hit testing uses each layer's hit rectangle, floored at
/// [`MIN_LAYER_SIZE`](crate::MIN_LAYER_SIZE), so layers resized down to
/// slivers remain tappable.
pub fn tap<C>(scene: &mut Scene<C>, location: Point) -> Option<LayerId> {
    let hit = scene.hit_test(location);
    scene.select(hit);
    scene.selected_id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::layer::Layer;
    use crate::scene::Position;

    #[test]
    fn test_tap_selects_and_empty_tap_clears() {
        let mut scene = Scene::new();
        scene.set_canvas_size(crate::geometry::Size::new(100.0, 100.0));
        let id = scene.add(
            Layer::new("a").with_frame(Rect::new(10.0, 10.0, 30.0, 30.0)),
            Position::Front,
        );
        scene.select(None);

        assert_eq!(tap(&mut scene, Point::new(20.0, 20.0)), Some(id));
        assert_eq!(scene.selected_id(), Some(id));

        assert!(tap(&mut scene, Point::new(90.0, 90.0)).is_none());
        assert!(scene.selected_id().is_none());
    }

    #[test]
    fn test_tap_reaches_tiny_layers_through_the_hit_floor() {
        let mut scene = Scene::new();
        scene.set_canvas_size(crate::geometry::Size::new(100.0, 100.0));
        let id = scene.add(
            Layer::new("sliver").with_frame(Rect::new(50.0, 50.0, 1.0, 1.0)),
            Position::Front,
        );
        scene.select(None);

        // Eight points off the 1x1 frame, inside the 20x20 hit rectangle.
        assert_eq!(tap(&mut scene, Point::new(58.0, 58.0)), Some(id));
    }
}
