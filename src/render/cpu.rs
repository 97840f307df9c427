use kurbo::{Point, Shape as _};

use crate::foundation::color::Rgba8;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::camera::{Projector, px_per_pt};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};
use crate::scene::geometry::{ORBIT_RESOLUTION, SphereMesh};
use crate::scene::model::{
    Backdrop, Label, Orbit, OverlayText, Primitive, Scene, Segment, Shading, Sphere,
};

/// Orbit samples per depth-sorted arc.
const ORBIT_ARC_SAMPLES: usize = 9;
/// Spheres smaller than this on screen are drawn as flat discs.
const MIN_MESH_RADIUS_PX: f64 = 2.0;
/// Ambient share of lit sphere shading.
const AMBIENT: f64 = 0.35;
/// Dash on/off lengths as multiples of the stroke width.
const DASH_ON: f64 = 3.7;
const DASH_OFF: f64 = 1.6;
/// Fraction of the canvas width a wrapped text block may use.
const TEXT_WRAP_FRACTION: f64 = 0.9;

struct TextState {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

/// CPU backend powered by `vello_cpu` for vector and text rasterization.
pub struct CpuBackend {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    text: Option<TextState>,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("canvas", &self.settings.canvas)
            .field("text", &self.text.is_some())
            .finish()
    }
}

impl CpuBackend {
    /// Create a backend for `settings.canvas`; shapes text only when a font is provided.
    pub fn new(settings: RenderSettings) -> ReelResult<Self> {
        let Canvas { width, height } = settings.canvas;
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width/height must be non-zero"));
        }
        if u16::try_from(width).is_err() || u16::try_from(height).is_err() {
            return Err(ReelError::validation("canvas width/height must fit in u16"));
        }

        let text = match settings.font_bytes.as_ref() {
            Some(bytes) => Some(TextState {
                engine: TextLayoutEngine::new(bytes)?,
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
                    0,
                ),
            }),
            None => None,
        };

        Ok(Self {
            settings,
            ctx: None,
            text,
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> ReelResult<R>,
    ) -> ReelResult<R> {
        let (width, height) = canvas_u16(self.settings.canvas)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_scene(&mut self, ctx: &mut vello_cpu::RenderContext, scene: &Scene) -> ReelResult<()> {
        let canvas = self.settings.canvas;
        let cam = Projector::new(canvas, scene.camera, scene.world_extent);
        let pt = px_per_pt(canvas);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint(scene.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));

        let mut items = Vec::<DepthItem<'_>>::new();
        let mut labels = Vec::<&Label>::new();
        for prim in &scene.items {
            match prim {
                Primitive::Sphere(s) => items.push(DepthItem {
                    depth: cam.depth(s.center),
                    kind: ItemKind::Sphere(s),
                }),
                Primitive::Orbit(o) => push_orbit_arcs(&mut items, &cam, o),
                Primitive::Segment(s) => items.push(DepthItem {
                    depth: cam.depth((s.from + s.to) * 0.5),
                    kind: ItemKind::Segment(s),
                }),
                Primitive::Label(l) => labels.push(l),
            }
        }
        // Farthest first; equal depths keep scene order.
        items.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        for item in &items {
            match item.kind {
                ItemKind::Sphere(s) => draw_sphere(ctx, &cam, s),
                ItemKind::Segment(s) => {
                    let path = polyline(&[cam.project(s.from).point, cam.project(s.to).point]);
                    let stroke = vello_cpu::kurbo::Stroke::new(s.width_pt * pt)
                        .with_caps(vello_cpu::kurbo::Cap::Round);
                    stroke_with_opacity(ctx, &path, stroke, s.color, s.opacity);
                }
                ItemKind::OrbitArc {
                    orbit,
                    ref path,
                    dash_offset,
                } => {
                    let width = orbit.width_pt * pt;
                    let stroke = if orbit.dashed {
                        vello_cpu::kurbo::Stroke::new(width)
                            .with_dashes(dash_offset, [DASH_ON * width, DASH_OFF * width])
                    } else {
                        vello_cpu::kurbo::Stroke::new(width).with_caps(vello_cpu::kurbo::Cap::Round)
                    };
                    stroke_with_opacity(ctx, path, stroke, orbit.color, orbit.opacity);
                }
            }
        }

        if self.text.is_some() {
            for label in labels {
                let anchor = cam.project(label.position).point;
                self.draw_text(
                    ctx,
                    TextBlock {
                        text: &label.text,
                        color: label.color,
                        size_px: label.size_pt * pt,
                        opacity: label.opacity,
                        placement: Placement::Baseline(anchor),
                        backdrop: None,
                    },
                )?;
            }
            for overlay in &scene.overlays {
                self.draw_overlay(ctx, overlay, pt)?;
            }
        }
        Ok(())
    }

    fn draw_overlay(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        overlay: &OverlayText,
        pt: f64,
    ) -> ReelResult<()> {
        let canvas = self.settings.canvas;
        let center = Point::new(
            overlay.anchor.x * f64::from(canvas.width),
            overlay.anchor.y * f64::from(canvas.height),
        );
        self.draw_text(
            ctx,
            TextBlock {
                text: &overlay.text,
                color: overlay.color,
                size_px: overlay.size_pt * pt,
                opacity: overlay.opacity,
                placement: Placement::Center(center),
                backdrop: overlay.backdrop.map(|b| Backdrop {
                    pad_pt: b.pad_pt * pt,
                    ..b
                }),
            },
        )
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        block: TextBlock<'_>,
    ) -> ReelResult<()> {
        let Some(text) = self.text.as_mut() else {
            return Ok(());
        };
        if block.text.trim().is_empty() || block.opacity <= 0.0 {
            return Ok(());
        }

        let brush = TextBrushRgba8 {
            r: block.color.r,
            g: block.color.g,
            b: block.color.b,
            a: block.color.a,
        };
        let max_width = (f64::from(self.settings.canvas.width) * TEXT_WRAP_FRACTION) as f32;
        let layout = text
            .engine
            .layout_plain(block.text, block.size_px as f32, brush, Some(max_width))?;

        let block_w = layout
            .lines()
            .map(|l| f64::from(l.metrics().advance))
            .fold(0.0, f64::max);
        let block_h = f64::from(layout.height());
        let origin = match block.placement {
            Placement::Center(c) => Point::new(c.x - block_w / 2.0, c.y - block_h / 2.0),
            Placement::Baseline(p) => {
                let baseline = layout
                    .lines()
                    .next()
                    .map(|l| f64::from(l.metrics().baseline))
                    .unwrap_or(0.0);
                Point::new(p.x - block_w / 2.0, p.y - baseline)
            }
        };

        let opacity = block.opacity.clamp(0.0, 1.0) as f32;
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }

        if let Some(backdrop) = block.backdrop {
            let pad = backdrop.pad_pt;
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(paint(backdrop.color));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                origin.x - pad,
                origin.y - pad,
                origin.x + block_w + pad,
                origin.y + block_h + pad,
            ));
        }

        for line in layout.lines() {
            let dx = (block_w - f64::from(line.metrics().advance)) / 2.0;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                origin.x + dx,
                origin.y,
            )));
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        if opacity < 1.0 {
            ctx.pop_layer();
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    fn render_scene(&mut self, scene: &Scene) -> ReelResult<FrameRGBA> {
        let (width, height) = canvas_u16(self.settings.canvas)?;
        self.with_ctx_mut(|this, ctx| {
            this.draw_scene(ctx, scene)?;
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: u32::from(width),
                height: u32::from(height),
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

struct DepthItem<'a> {
    depth: f64,
    kind: ItemKind<'a>,
}

enum ItemKind<'a> {
    Sphere(&'a Sphere),
    Segment(&'a Segment),
    OrbitArc {
        orbit: &'a Orbit,
        path: vello_cpu::kurbo::BezPath,
        /// Screen length of the orbit before this arc, so dashes continue across arcs.
        dash_offset: f64,
    },
}

enum Placement {
    Center(Point),
    Baseline(Point),
}

struct TextBlock<'a> {
    text: &'a str,
    color: Rgba8,
    size_px: f64,
    opacity: f64,
    placement: Placement,
    backdrop: Option<Backdrop>,
}

fn push_orbit_arcs<'a>(items: &mut Vec<DepthItem<'a>>, cam: &Projector, orbit: &'a Orbit) {
    let samples = orbit.shape.sample(ORBIT_RESOLUTION);
    let step = ORBIT_ARC_SAMPLES - 1;
    let mut start = 0;
    let mut dash_offset = 0.0;
    while start + 1 < samples.len() {
        let end = (start + step).min(samples.len() - 1);
        let arc = &samples[start..=end];
        let depth = arc.iter().map(|&p| cam.depth(p)).sum::<f64>() / arc.len() as f64;
        let pts: Vec<Point> = arc.iter().map(|&p| cam.project(p).point).collect();

        items.push(DepthItem {
            depth,
            kind: ItemKind::OrbitArc {
                orbit,
                path: polyline(&pts),
                dash_offset,
            },
        });
        dash_offset += pts.windows(2).map(|w| w[0].distance(w[1])).sum::<f64>();
        start = end;
    }
}

fn draw_sphere(ctx: &mut vello_cpu::RenderContext, cam: &Projector, s: &Sphere) {
    let c = cam.project(s.center);
    let r_px = s.radius * c.px_per_unit;
    let opacity = s.opacity.clamp(0.0, 1.0) as f32;
    if opacity <= 0.0 || r_px <= 0.0 {
        return;
    }

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }

    let silhouette = circle_path(c.point, r_px);
    let flat = s.shading == Shading::Unlit || r_px < MIN_MESH_RADIUS_PX;
    let base = match s.shading {
        Shading::Unlit => s.color,
        _ if flat => s.color,
        Shading::Lit => s.color.shade(AMBIENT),
        Shading::Gradient => s.color.shade(0.5),
    };
    ctx.set_paint(paint(base));
    ctx.fill_path(&silhouette);

    if !flat {
        let light = cam.light_dir();
        let mesh = SphereMesh::new(s.center, s.radius, s.resolution);
        let mut faces: Vec<_> = mesh
            .faces()
            .filter(|f| cam.faces_camera(f.centroid, f.normal))
            .map(|f| (cam.depth(f.centroid), f))
            .collect();
        faces.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (_, face) in faces {
            let color = match s.shading {
                Shading::Gradient => gradient_color(s.color, face.v),
                _ => {
                    let k = AMBIENT + (1.0 - AMBIENT) * face.normal.dot(light).max(0.0);
                    s.color.shade(k)
                }
            };
            let mut path = vello_cpu::kurbo::BezPath::new();
            for (i, corner) in face.corners.iter().enumerate() {
                let p = cam.project(*corner).point;
                let p = vello_cpu::kurbo::Point::new(p.x, p.y);
                if i == 0 {
                    path.move_to(p);
                } else {
                    path.line_to(p);
                }
            }
            path.close_path();
            ctx.set_paint(paint(color));
            ctx.fill_path(&path);
        }
    }

    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

/// White at the top, the base color at the equator, black at the bottom.
fn gradient_color(base: Rgba8, v: f64) -> Rgba8 {
    if v < 0.5 {
        Rgba8::WHITE.mix(base, v * 2.0)
    } else {
        base.mix(Rgba8::BLACK, (v - 0.5) * 2.0)
    }
}

fn stroke_with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    path: &vello_cpu::kurbo::BezPath,
    stroke: vello_cpu::kurbo::Stroke,
    color: Rgba8,
    opacity: f64,
) {
    let opacity = opacity.clamp(0.0, 1.0) as f32;
    if opacity <= 0.0 || stroke.width <= 0.0 || path.elements().is_empty() {
        return;
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint(color));
    ctx.set_stroke(stroke);
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.stroke_path(path);
    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

fn polyline(pts: &[Point]) -> vello_cpu::kurbo::BezPath {
    let mut path = vello_cpu::kurbo::BezPath::new();
    for (i, &p) in pts.iter().enumerate() {
        let p = vello_cpu::kurbo::Point::new(p.x, p.y);
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

fn circle_path(center: Point, r: f64) -> vello_cpu::kurbo::BezPath {
    let circle = kurbo::Circle::new(center, r);
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in circle.path_elements(0.1) {
        push_el(&mut p, el);
    }
    p
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn canvas_u16(canvas: Canvas) -> ReelResult<(u16, u16)> {
    let w = u16::try_from(canvas.width)
        .map_err(|_| ReelError::render("canvas width does not fit in u16"))?;
    let h = u16::try_from(canvas.height)
        .map_err(|_| ReelError::render("canvas height does not fit in u16"))?;
    Ok((w, h))
}

fn push_el(out: &mut vello_cpu::kurbo::BezPath, el: kurbo::PathEl) {
    use kurbo::PathEl;

    let cpu = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    match el {
        PathEl::MoveTo(p) => out.move_to(cpu(p)),
        PathEl::LineTo(p) => out.line_to(cpu(p)),
        PathEl::QuadTo(p1, p2) => out.quad_to(cpu(p1), cpu(p2)),
        PathEl::CurveTo(p1, p2, p3) => out.curve_to(cpu(p1), cpu(p2), cpu(p3)),
        PathEl::ClosePath => out.close_path(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
