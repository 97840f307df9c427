use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::ReelResult;
use crate::scene::model::Scene;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as `[r, g, b, a]`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A renderer that turns a [`Scene`] into a [`FrameRGBA`].
///
/// Backends keep only caches (raster context, shaped text engine) between calls; the output of
/// `render_scene` depends on the scene alone.
pub trait RenderBackend {
    /// Rasterize one scene.
    fn render_scene(&mut self, scene: &Scene) -> ReelResult<FrameRGBA>;

    /// Return backend settings required to construct equivalent worker backends.
    ///
    /// This is used by parallel rendering paths.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Output resolution.
    pub canvas: Canvas,
    /// Font used for every text run. Text is skipped when `None`.
    pub font_bytes: Option<Arc<Vec<u8>>>,
}

impl RenderSettings {
    /// Settings without a font; overlays and labels are not drawn.
    pub fn without_text(canvas: Canvas) -> Self {
        Self {
            canvas,
            font_bytes: None,
        }
    }
}

/// Create a rendering backend implementation.
///
/// - `BackendKind::Cpu` is always available.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> ReelResult<Box<dyn RenderBackend + Send>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        )?)),
    }
}
