//! Scene flattening into raster snapshots.
//!
//! Walks a [`Scene`] in paint order, asks a host-supplied [`LayerRasterizer`]
//! for each layer's pixels, and composites the results into a single
//! [`Pixmap`] with the tiny-skia pipeline. Content is scaled per axis from
//! canvas coordinates to the requested output size, and crop windows become
//! rectangular clip masks.

use livecanvas_core::{Layer, Rect, Scene, Size};
use tiny_skia::{FillRule, FilterQuality, Mask, PathBuilder, Pixmap, PixmapPaint, Transform};
use tracing::{debug, warn};

/// Produces pixel content for a single layer.
///
/// The renderer stays agnostic of what layers contain; the host supplies the
/// pixels. A snapshot can itself be handed back as layer content, so scenes
/// may nest to any depth.
pub trait LayerRasterizer<C> {
    /// Rasterize `layer` at `size`, the device-pixel size of the layer's
    /// scaled frame. Returning `None` leaves the layer out of the snapshot.
    fn rasterize(&mut self, layer: &Layer<C>, size: Size) -> Option<Pixmap>;
}

impl<C, F> LayerRasterizer<C> for F
where
    F: FnMut(&Layer<C>, Size) -> Option<Pixmap>,
{
    fn rasterize(&mut self, layer: &Layer<C>, size: Size) -> Option<Pixmap> {
        self(layer, size)
    }
}

/// Configuration for snapshot rendering and encoding.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: [255, 255, 255, 255],
            jpeg_quality: 85,
        }
    }
}

/// Flattens a [`Scene`] into a single bitmap.
pub struct SceneRenderer {
    options: RenderOptions,
}

impl SceneRenderer {
    /// Create a new renderer with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Create a renderer with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RenderOptions::default())
    }

    /// The active render options.
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Flatten `scene` into a bitmap of `target` size, defaulting to the
    /// canvas size.
    ///
    /// Layers are drawn bottom to top, each scaled per axis by
    /// `target / canvas`. Layers whose frame is still unresolved and layers
    /// the rasterizer declines are left out. A `clip_frame` restricts the
    /// drawn pixels to the crop window while the full frame still positions
    /// the content.
    ///
    /// Returns `None` when the canvas size is not yet known or the target
    /// size is degenerate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render<C, R>(
        &self,
        scene: &Scene<C>,
        rasterizer: &mut R,
        target: Option<Size>,
    ) -> Option<Pixmap>
    where
        R: LayerRasterizer<C> + ?Sized,
    {
        let Some(canvas) = scene.canvas_size() else {
            warn!("snapshot requested before the canvas size is known");
            return None;
        };
        let target = target.unwrap_or(canvas);
        if target.is_degenerate() {
            warn!(?target, "snapshot target size is degenerate");
            return None;
        }

        let width = (target.width.round() as u32).max(1);
        let height = (target.height.round() as u32).max(1);
        let mut pixmap = Pixmap::new(width, height)?;

        let bg = self.options.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(bg[0], bg[1], bg[2], bg[3]));

        let scale = Size::new(target.width / canvas.width, target.height / canvas.height);
        for layer in scene.layers() {
            let Some(frame) = layer.frame else {
                debug!(id = %layer.id(), "skipping layer without a resolved frame");
                continue;
            };
            let dest = frame.scaled_by(scale);
            let Some(content) = rasterizer.rasterize(layer, dest.size) else {
                warn!(id = %layer.id(), "rasterizer produced no content for layer");
                continue;
            };

            let mask = layer
                .clip_frame
                .and_then(|clip| clip_mask(clip.scaled_by(scale), width, height));
            draw_layer(&mut pixmap, &content, dest, mask.as_ref());
        }

        Some(pixmap)
    }
}

/// Draw `content` stretched over `dest`, optionally masked.
#[allow(clippy::cast_precision_loss)]
fn draw_layer(pixmap: &mut Pixmap, content: &Pixmap, dest: Rect, mask: Option<&Mask>) {
    if dest.size.is_degenerate() || content.width() == 0 || content.height() == 0 {
        return;
    }
    let sx = dest.size.width / content.width() as f32;
    let sy = dest.size.height / content.height() as f32;
    let transform = Transform::from_scale(sx, sy).post_translate(dest.origin.x, dest.origin.y);
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, content.as_ref(), &paint, transform, mask);
}

/// Build a rectangular mask covering `clip` in output pixel space.
fn clip_mask(clip: Rect, width: u32, height: u32) -> Option<Mask> {
    let rect =
        tiny_skia::Rect::from_xywh(clip.origin.x, clip.origin.y, clip.size.width, clip.size.height)?;
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(
        &PathBuilder::from_rect(rect),
        FillRule::Winding,
        true,
        Transform::identity(),
    );
    Some(mask)
}
