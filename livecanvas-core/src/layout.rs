//! Initial frame resolution.
//!
//! Layers start life with `frame == None`; the host runs
//! [`Scene::resolve_layout`] once its view hierarchy can measure content,
//! and each pending layer gets a first frame from its [`InitialSize`]
//! policy. After that the stored frame is authoritative and the policy is
//! never consulted again.

use tracing::debug;

use crate::geometry::{Point, Rect, Size};
use crate::layer::{InitialSize, Layer, LayerId};
use crate::scene::Scene;

/// Compute a layer's first frame from its sizing policy.
///
/// `measured` is the content's natural size; it is only meaningful for
/// [`InitialSize::Fit`] and [`InitialSize::Intrinsic`]. A degenerate
/// measurement under `Fit` falls back to the target size unscaled.
#[must_use]
pub fn initial_frame(policy: InitialSize, measured: Size, canvas: Size) -> Rect {
    match policy {
        InitialSize::Fill => Rect::from_parts(Point::ZERO, canvas),
        InitialSize::Fit(target) => {
            if measured.is_degenerate() {
                centered(target, canvas)
            } else {
                let scale =
                    (target.width / measured.width).min(target.height / measured.height);
                centered(measured.scaled_by(Size::new(scale, scale)), canvas)
            }
        }
        InitialSize::Fixed(size) => centered(size, canvas),
        InitialSize::Intrinsic => centered(measured, canvas),
    }
}

fn centered(size: Size, canvas: Size) -> Rect {
    Rect::from_parts(
        Point::new(
            (canvas.width - size.width) / 2.0,
            (canvas.height - size.height) / 2.0,
        ),
        size,
    )
}

impl<C> Scene<C> {
    /// Give every un-laid-out layer its initial frame.
    ///
    /// `measure` reports the natural size of a layer's content; it is called
    /// only for layers whose policy needs it. Initial placement is not a
    /// user action, so nothing is recorded in history. Returns the number of
    /// layers resolved (zero before the canvas size is known), letting the
    /// host skip a repaint when nothing changed.
    pub fn resolve_layout(&mut self, mut measure: impl FnMut(&Layer<C>) -> Size) -> usize {
        let Some(canvas) = self.canvas_size() else {
            return 0;
        };
        let pending: Vec<LayerId> = self
            .layers()
            .filter(|layer| layer.frame.is_none())
            .map(Layer::id)
            .collect();
        let mut resolved = 0;
        for id in pending {
            let Some(layer) = self.get(id) else { continue };
            let policy = layer.initial_size;
            let measured = match policy {
                InitialSize::Fit(_) | InitialSize::Intrinsic => measure(layer),
                InitialSize::Fill | InitialSize::Fixed(_) => Size::ZERO,
            };
            let frame = initial_frame(policy, measured, canvas);
            if self.mutate(id, |layer| layer.frame = Some(frame)) {
                resolved += 1;
            }
        }
        if resolved > 0 {
            debug!(resolved, "resolved initial layout");
        }
        resolved
    }
}
