//! Gesture Integration Tests
//!
//! Tests complete pointer-driven editing flows including:
//! - Tap to select, drag to move, corner drag to resize
//! - Crop window editing against the content frame
//! - Gesture cancellation and per-gesture undo granularity
//! - Samples arriving before the scene is ready

use livecanvas_core::{
    tap, CropController, Layer, LayerId, MoveController, Point, PointerEvent, PointerPhase,
    Position, Rect, ResizeController, ResizeMode, Scene, Size,
};

const CANVAS: Size = Size::new(200.0, 200.0);

/// A scene holding one movable, resizable photo layer.
fn photo_scene() -> (Scene<&'static str>, LayerId) {
    let mut scene = Scene::new();
    scene.set_canvas_size(CANVAS);
    let id = scene.add(
        Layer::new("photo").with_frame(Rect::new(40.0, 40.0, 80.0, 40.0)),
        Position::Front,
    );
    (scene, id)
}

/// Drive a whole drag through a controller callback.
fn drag(samples: &[Point], mut feed: impl FnMut(PointerEvent)) {
    let (first, rest) = samples.split_first().expect("drag needs samples");
    feed(PointerEvent::start(*first));
    for point in rest {
        feed(PointerEvent::moved(*point));
    }
    feed(PointerEvent::end(*samples.last().expect("drag needs samples")));
}

fn frame_of(scene: &Scene<&'static str>, id: LayerId) -> Rect {
    scene
        .get(id)
        .and_then(|layer| layer.frame)
        .expect("layer frame should be resolved")
}

// ============================================================================
// Select, Move, Resize Workflow Tests
// ============================================================================

#[test]
fn test_tap_move_resize_session() {
    let (mut scene, id) = photo_scene();
    scene.select(None);

    // Tap the photo to select it.
    assert_eq!(tap(&mut scene, Point::new(60.0, 60.0)), Some(id));

    // Drag it 40 right, grabbing it off-center.
    let mut mover = MoveController::new(id);
    drag(&[Point::new(60.0, 60.0), Point::new(100.0, 60.0)], |event| {
        mover.handle(&mut scene, event);
    });
    assert_eq!(frame_of(&scene, id).origin, Point::new(80.0, 40.0));

    // Pull the corner out to grow it.
    let mut resizer = ResizeController::new(id);
    drag(&[Point::new(160.0, 80.0), Point::new(180.0, 120.0)], |event| {
        resizer.handle(&mut scene, event);
    });
    assert_eq!(frame_of(&scene, id).size, Size::new(100.0, 80.0));

    // Tap empty canvas to deselect.
    assert!(tap(&mut scene, Point::new(5.0, 190.0)).is_none());
    assert!(scene.selected_id().is_none());

    // Each gesture is one undo step; taps record nothing.
    assert!(scene.undo());
    assert_eq!(frame_of(&scene, id).size, Size::new(80.0, 40.0));
    assert!(scene.undo());
    assert_eq!(frame_of(&scene, id).origin, Point::new(40.0, 40.0));
    assert!(scene.undo());
    assert!(scene.is_empty());
    assert!(!scene.undo());
}

#[test]
fn test_cancelled_drag_still_undoes_cleanly() {
    let (mut scene, id) = photo_scene();
    let mut mover = MoveController::new(id);

    mover.handle(&mut scene, PointerEvent::start(Point::new(60.0, 60.0)));
    mover.handle(&mut scene, PointerEvent::moved(Point::new(90.0, 60.0)));
    // The system claims the gesture mid-flight.
    mover.handle(&mut scene, PointerEvent::cancel(Point::new(90.0, 60.0)));
    assert_eq!(frame_of(&scene, id).origin, Point::new(70.0, 40.0));

    // The partial drag stays on the undo stack as a single step.
    assert!(scene.undo());
    assert_eq!(frame_of(&scene, id).origin, Point::new(40.0, 40.0));

    // The controller is reusable afterwards with a fresh grab offset.
    assert!(scene.redo());
    mover.handle(&mut scene, PointerEvent::start(Point::new(75.0, 45.0)));
    mover.handle(&mut scene, PointerEvent::moved(Point::new(85.0, 45.0)));
    assert_eq!(frame_of(&scene, id).origin, Point::new(80.0, 40.0));
}

#[test]
fn test_proportional_photo_resize_holds_aspect() {
    let mut scene = Scene::new();
    scene.set_canvas_size(CANVAS);
    let id = scene.add(
        Layer::new("photo")
            .with_frame(Rect::new(0.0, 0.0, 80.0, 40.0))
            .with_resize(ResizeMode::Proportional),
        Position::Front,
    );
    let mut resizer = ResizeController::new(id);

    drag(
        &[
            Point::new(80.0, 40.0),
            Point::new(100.0, 44.0),
            Point::new(120.0, 50.0),
            Point::new(121.0, 90.0),
        ],
        |event| {
            resizer.handle(&mut scene, event);
        },
    );

    let size = frame_of(&scene, id).size;
    // The height drag dominated the final sample: ratio 90/40 = 2.25.
    assert!((size.width - 180.0).abs() < 1e-3);
    assert!((size.height - 90.0).abs() < 1e-3);
    assert!((size.width / size.height - 2.0).abs() < 1e-4);
}

// ============================================================================
// Crop Workflow Tests
// ============================================================================

#[test]
fn test_crop_then_move_keeps_the_window_inside() {
    let (mut scene, id) = photo_scene();
    let mut cropper = CropController::new(id);

    // Shrink the default full-frame window from the corner.
    drag(&[Point::new(120.0, 80.0), Point::new(80.0, 70.0)], |event| {
        cropper.handle_resize(&mut scene, event);
    });
    let clip = scene.get(id).and_then(|layer| layer.clip_frame).expect("window exists");
    assert_eq!(clip, Rect::new(40.0, 40.0, 40.0, 30.0));

    // Slide the window; it stops at the frame boundary.
    drag(&[Point::new(50.0, 50.0), Point::new(150.0, 50.0)], |event| {
        cropper.handle_move(&mut scene, event);
    });
    let clip = scene.get(id).and_then(|layer| layer.clip_frame).expect("window exists");
    assert_eq!(clip, Rect::new(80.0, 40.0, 40.0, 30.0));

    // The presented rectangle is now the window, so taps follow it.
    scene.select(None);
    assert_eq!(tap(&mut scene, Point::new(100.0, 50.0)), Some(id));
    assert!(tap(&mut scene, Point::new(45.0, 45.0)).is_none());
}

#[test]
fn test_resizing_a_cropped_layer_preserves_the_mapping() {
    let mut scene = Scene::new();
    scene.set_canvas_size(CANVAS);
    let id = scene.add(
        Layer::new("photo")
            .with_frame(Rect::new(10.0, 10.0, 80.0, 40.0))
            .with_clip_frame(Rect::new(30.0, 20.0, 20.0, 10.0)),
        Position::Front,
    );
    let mut resizer = ResizeController::new(id);

    drag(&[Point::new(50.0, 30.0), Point::new(90.0, 50.0)], |event| {
        resizer.handle(&mut scene, event);
    });

    let layer = scene.get(id).expect("layer present");
    let clip = layer.clip_frame.expect("window present");
    let frame = layer.frame.expect("frame present");
    // The drag tripled the window; the content frame scaled around it.
    assert_eq!(clip, Rect::new(30.0, 20.0, 60.0, 30.0));
    assert_eq!(frame, Rect::new(-30.0, -10.0, 240.0, 120.0));
    // Same relative placement of the window within the content.
    assert!(((clip.origin.x - frame.origin.x) / frame.size.width - 0.25).abs() < 1e-4);
    assert!((clip.size.width / frame.size.width - 0.25).abs() < 1e-4);
}

// ============================================================================
// Readiness and Transport Tests
// ============================================================================

#[test]
fn test_samples_before_layout_are_ignored() {
    let mut scene: Scene<&'static str> = Scene::new();
    let id = scene.add(Layer::new("unplaced"), Position::Front);
    let mut mover = MoveController::new(id);
    let mut resizer = ResizeController::new(id);

    // No canvas size, no frame: everything is dropped on the floor.
    assert!(!mover.handle(&mut scene, PointerEvent::start(Point::new(10.0, 10.0))));
    assert!(!resizer.handle(&mut scene, PointerEvent::start(Point::new(10.0, 10.0))));

    scene.set_canvas_size(CANVAS);
    assert!(!mover.handle(&mut scene, PointerEvent::moved(Point::new(20.0, 20.0))));
    assert!(scene.get(id).and_then(|layer| layer.frame).is_none());
}

#[test]
fn test_pointer_events_serialize_for_transport() {
    let event = PointerEvent::start(Point::new(12.5, 7.0));
    let json = serde_json::to_string(&event).expect("event serializes");
    assert!(json.contains("\"start\""));

    let back: PointerEvent = serde_json::from_str(&json).expect("event parses");
    assert_eq!(back.phase, PointerPhase::Start);
    assert!((back.location.x - 12.5).abs() < f32::EPSILON);
    assert!(!back.phase.is_terminal());
}
