//! Per-frame scene composition.
//!
//! [`compose_frame`] is a pure function of the configuration and a frame index. The only
//! randomness (the plum-pudding electron layout) comes from an RNG re-seeded on every call, so
//! any frame can be composed in isolation and in any order.

use std::f64::consts::{PI, TAU};

use crate::config::{Style, VideoConfig};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{FrameIndex, Point, Vec3};
use crate::foundation::math::lerp;
use crate::scene::geometry::OrbitShape;
use crate::scene::model::{
    Backdrop, Label, Orbit, OverlayRole, OverlayText, Scene, Segment, Shading, Sphere,
};
use crate::scene::narrative::section_text;
use crate::timeline::{Section, SectionClock, animate_text, camera_pose, transition_alpha};

/// Text and geometry sizes of one style.
#[derive(Clone, Copy, Debug)]
struct Look {
    world_extent: f64,
    sphere_resolution: usize,
    title_pt: f64,
    subtitle_pt: f64,
    body_pt: f64,
    label_pt: f64,
    photon_pt: f64,
}

impl Look {
    fn of(style: Style) -> Self {
        match style {
            Style::Classic => Self {
                world_extent: 5.0,
                sphere_resolution: 20,
                title_pt: 36.0,
                subtitle_pt: 0.0,
                body_pt: 24.0,
                label_pt: 12.0,
                photon_pt: 16.0,
            },
            Style::Enhanced => Self {
                world_extent: 8.0,
                sphere_resolution: 40,
                title_pt: 48.0,
                subtitle_pt: 32.0,
                body_pt: 30.0,
                label_pt: 18.0,
                photon_pt: 20.0,
            },
        }
    }
}

const TITLE_ANCHOR: Point = Point::new(0.5, 0.08);
const SUBTITLE_ANCHOR: Point = Point::new(0.5, 0.12);
const BODY_ANCHOR: Point = Point::new(0.5, 0.88);

/// Compose the scene for `frame`.
pub fn compose_frame(cfg: &VideoConfig, frame: FrameIndex) -> Scene {
    compose_at(cfg, SectionClock::at_frame(frame, cfg.total_frames()))
}

/// Compose the scene for an explicit clock.
pub fn compose_at(cfg: &VideoConfig, clock: SectionClock) -> Scene {
    let look = Look::of(cfg.style);
    let mut b = SceneBuilder {
        cfg,
        look,
        clock,
        ta: transition_alpha(cfg.style, clock.local),
        scene: Scene::new(
            cfg.palette.background,
            camera_pose(cfg.style, clock.progress),
            look.world_extent,
        ),
    };

    match clock.section {
        Section::Dalton => b.dalton(),
        Section::Thomson => b.thomson(),
        Section::Rutherford => b.rutherford(),
        Section::Bohr => b.bohr(),
    }
    b.scene
}

/// Plum-pudding electron centers for the given section-local and global progress.
///
/// The RNG is seeded from `seed` on every call, so electrons keep their identity from frame to
/// frame and only their count (and, in the enhanced style, their wobble) changes.
pub fn plum_pudding_electrons(style: Style, seed: u64, local: f64, progress: f64) -> Vec<Vec3> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut uniform = |lo: f64, hi: f64| lo + (hi - lo) * rng.f64();

    match style {
        Style::Classic => {
            if local <= 0.3 {
                return Vec::new();
            }
            let count = (local * 10.0).floor() as usize;
            (0..count)
                .map(|_| {
                    let theta = uniform(0.0, TAU);
                    let phi = uniform(0.0, PI);
                    let r = uniform(1.0, 2.8);
                    spherical(r, theta, phi)
                })
                .collect()
        }
        Style::Enhanced => {
            if local <= 0.2 {
                return Vec::new();
            }
            let count = ((local * 20.0).floor() as usize).min(12);
            (0..count)
                .map(|i| {
                    let theta = uniform(0.0, TAU);
                    let phi = uniform(0.0, PI);
                    let r = uniform(2.0, 4.5);
                    let wobble = (progress * 5.0 + i as f64).sin() * 0.5;
                    spherical(r, theta + progress * 3.0, phi + wobble)
                })
                .collect()
        }
    }
}

fn spherical(r: f64, theta: f64, phi: f64) -> Vec3 {
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Bohr-section electron: ground orbit, jump, then excited orbit.
///
/// `None` until the electron appears halfway through the section.
pub fn bohr_electron(style: Style, local: f64, progress: f64) -> Option<Vec3> {
    if local <= 0.5 {
        return None;
    }
    let on_circle = |radius: f64, angle: f64, z: f64| {
        Vec3::new(radius * angle.cos(), radius * angle.sin(), z)
    };
    Some(match style {
        Style::Classic => {
            let (level, angle) = if local < 0.7 {
                (0.0, local * 10.0 * TAU)
            } else if local < 0.8 {
                ((local - 0.7) * 10.0, 0.0)
            } else {
                (1.0, (local - 0.8) * 5.0 * TAU)
            };
            on_circle(1.0 + level * 1.5, angle, 0.0)
        }
        Style::Enhanced => {
            if local < 0.6 {
                on_circle(1.5, progress * 10.0 * TAU, 0.0)
            } else if local < 0.7 {
                let t = (local - 0.6) * 10.0;
                on_circle(lerp(1.5, 3.5, t), progress * 10.0 * TAU, t * 1.5)
            } else {
                on_circle(3.5, (progress - 0.1) * 5.0 * TAU, 0.0)
            }
        }
    })
}

/// The short "Photon emitted" flash during the electron's jump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotonCue {
    /// Stroke start.
    pub from: Vec3,
    /// Stroke end.
    pub to: Vec3,
    /// Caption anchor.
    pub label_at: Vec3,
    /// Stroke opacity.
    pub opacity: f64,
    /// Caption opacity.
    pub label_opacity: f64,
}

/// Photon cue for the current Bohr frame, if inside its window.
pub fn photon_cue(style: Style, local: f64, electron: Vec3) -> Option<PhotonCue> {
    match style {
        Style::Classic => (0.7 < local && local < 0.75).then(|| PhotonCue {
            from: Vec3::ZERO,
            to: Vec3::new(0.0, 0.0, 3.0),
            label_at: Vec3::new(0.0, 0.0, 3.5),
            opacity: (local - 0.7) * 5.0,
            label_opacity: 1.0,
        }),
        Style::Enhanced => (0.6 < local && local < 0.65).then(|| {
            let alpha = (local - 0.6) * 10.0;
            PhotonCue {
                from: electron,
                to: electron + Vec3::new(0.0, 0.0, 4.0),
                label_at: electron + Vec3::new(0.0, 0.0, 5.0),
                opacity: alpha,
                label_opacity: alpha,
            }
        }),
    }
}

struct SceneBuilder<'a> {
    cfg: &'a VideoConfig,
    look: Look,
    clock: SectionClock,
    ta: f64,
    scene: Scene,
}

impl SceneBuilder<'_> {
    fn style(&self) -> Style {
        self.cfg.style
    }

    fn sp(&self) -> f64 {
        self.clock.local
    }

    fn headings(&mut self, opacity: f64) {
        let text = section_text(self.style(), self.clock.section);
        let palette = self.cfg.palette;
        self.overlay(
            OverlayRole::Title,
            text.title,
            palette.text,
            self.look.title_pt,
            opacity,
            TITLE_ANCHOR,
        );
        if let Some(sub) = text.subtitle {
            self.overlay(
                OverlayRole::Subtitle,
                sub,
                palette.highlight,
                self.look.subtitle_pt,
                opacity,
                SUBTITLE_ANCHOR,
            );
        }
    }

    fn description(&mut self, reveal: f64, opacity: f64) {
        let body = section_text(self.style(), self.clock.section).body;
        let shown = animate_text(body, reveal);
        self.overlay(
            OverlayRole::Description,
            shown,
            self.cfg.palette.text,
            self.look.body_pt,
            opacity,
            BODY_ANCHOR,
        );
    }

    fn overlay(
        &mut self,
        role: OverlayRole,
        text: &str,
        color: Rgba8,
        size_pt: f64,
        opacity: f64,
        anchor: Point,
    ) {
        if text.is_empty() || opacity <= 0.0 {
            return;
        }
        let backdrop = match (self.style(), role) {
            (Style::Enhanced, OverlayRole::Description) => Some(Backdrop {
                color: Rgba8 {
                    a: 0x80,
                    ..self.cfg.palette.background
                },
                pad_pt: 10.0,
            }),
            _ => None,
        };
        self.scene.overlays.push(OverlayText {
            role,
            text: text.to_owned(),
            color,
            size_pt,
            opacity: opacity.min(1.0),
            anchor,
            backdrop,
        });
    }

    /// Particle with the style's treatment: plain lit sphere in classic, glow halo plus body in
    /// enhanced.
    fn particle(&mut self, p: ParticleSpec) {
        let res = self.look.sphere_resolution;
        if let Some(glow) = p.glow {
            self.scene.push(Sphere {
                center: p.center,
                radius: p.radius * glow.factor,
                color: self.cfg.palette.glow,
                opacity: glow.opacity,
                shading: Shading::Unlit,
                resolution: res,
            });
        }
        self.scene.push(Sphere {
            center: p.center,
            radius: p.radius,
            color: p.color,
            opacity: p.opacity,
            shading: p.shading,
            resolution: res,
        });
    }

    /// Enhanced particle: glow at `glow_alpha × ta`, body at `0.9 × ta`.
    fn glowing(&mut self, center: Vec3, radius: f64, color: Rgba8, factor: f64, glow_alpha: f64) {
        self.particle(ParticleSpec {
            center,
            radius,
            color,
            opacity: self.ta * 0.9,
            shading: Shading::Lit,
            glow: Some(Glow {
                factor,
                opacity: self.ta * glow_alpha,
            }),
        });
    }

    fn plain(&mut self, center: Vec3, radius: f64, color: Rgba8, opacity: f64) {
        self.particle(ParticleSpec {
            center,
            radius,
            color,
            opacity,
            shading: Shading::Lit,
            glow: None,
        });
    }

    fn label(&mut self, position: Vec3, text: String, color: Rgba8, size_pt: f64, opacity: f64) {
        self.scene.push(Label {
            position,
            text,
            color,
            size_pt,
            opacity: opacity.min(1.0),
        });
    }

    fn dalton(&mut self) {
        let sp = self.sp();
        let palette = self.cfg.palette;
        match self.style() {
            Style::Classic => {
                self.headings(1.0);
                self.description(sp * 3.0, 1.0);
            }
            Style::Enhanced => {
                if sp < 0.3 {
                    self.headings(sp * 3.0);
                } else {
                    self.headings(1.0);
                    let t = sp - 0.3;
                    self.description((t * 3.0).min(1.0), (t * 2.0).min(1.0));
                }
            }
        }

        if sp <= 0.2 {
            return;
        }
        let atoms = match self.style() {
            Style::Classic => [
                (Vec3::new(-2.0, -1.0, 0.0), 0.8, palette.proton),
                (Vec3::new(2.0, 1.0, 0.0), 1.0, palette.electron),
                (Vec3::new(0.0, -2.0, 1.0), 0.6, palette.neutron),
            ],
            Style::Enhanced => [
                (Vec3::new(-3.0, -2.0, 0.0), 1.6, palette.proton),
                (Vec3::new(3.0, 2.0, 0.0), 2.0, palette.electron),
                (Vec3::new(0.0, -3.0, 2.0), 1.2, palette.neutron),
            ],
        };
        for (i, (center, radius, color)) in atoms.into_iter().enumerate() {
            match self.style() {
                Style::Classic => {
                    self.plain(center, radius, color, ((sp - 0.2) * 1.5).min(1.0));
                }
                Style::Enhanced => self.particle(ParticleSpec {
                    center,
                    radius,
                    color,
                    opacity: self.ta * 0.9,
                    shading: Shading::Gradient,
                    glow: Some(Glow {
                        factor: 1.8,
                        opacity: self.ta * 0.2,
                    }),
                }),
            }

            if sp > 0.5 {
                let (lift, opacity) = match self.style() {
                    Style::Classic => (0.3, 1.0),
                    Style::Enhanced => (0.5, (sp - 0.5) * 2.0),
                };
                self.label(
                    center + Vec3::new(0.0, 0.0, radius + lift),
                    format!("Element {}", i + 1),
                    palette.text,
                    self.look.label_pt,
                    opacity,
                );
            }
        }
    }

    fn thomson(&mut self) {
        let sp = self.sp();
        let palette = self.cfg.palette;
        self.headings(1.0);
        match self.style() {
            Style::Classic => self.description(sp * 3.0, 1.0),
            Style::Enhanced => {
                let t = (sp * 3.0).min(1.0);
                self.description(t, t);
            }
        }

        if sp <= 0.1 {
            return;
        }
        match self.style() {
            Style::Classic => self.plain(Vec3::ZERO, 3.0, palette.nucleus, 0.3),
            Style::Enhanced => self.particle(ParticleSpec {
                center: Vec3::ZERO,
                radius: 5.0,
                color: palette.nucleus,
                opacity: self.ta * 0.3,
                shading: Shading::Lit,
                glow: Some(Glow {
                    factor: 2.0,
                    opacity: self.ta * 0.1,
                }),
            }),
        }

        let electrons =
            plum_pudding_electrons(self.style(), self.cfg.seed, sp, self.clock.progress);
        for center in electrons {
            match self.style() {
                Style::Classic => self.plain(center, 0.2, palette.electron, 1.0),
                Style::Enhanced => self.glowing(center, 0.4, palette.electron, 1.5, 0.2),
            }
        }
    }

    fn rutherford(&mut self) {
        let sp = self.sp();
        let p = self.clock.progress;
        let palette = self.cfg.palette;
        self.headings(1.0);
        match self.style() {
            Style::Classic => self.description(sp * 3.0, 1.0),
            Style::Enhanced => {
                let t = (sp * 3.0).min(1.0);
                self.description(t, t);
            }
        }

        if sp <= 0.1 {
            return;
        }
        match self.style() {
            Style::Classic => {
                self.plain(Vec3::ZERO, 0.5, palette.nucleus, 1.0);
                if sp <= 0.3 {
                    return;
                }
                for i in 0..3 {
                    let fi = f64::from(i);
                    let radius = 1.5 + fi;
                    if sp <= 0.3 + fi * 0.2 {
                        continue;
                    }
                    self.scene.push(Orbit {
                        shape: OrbitShape::circle(radius),
                        color: palette.orbit,
                        opacity: 0.5,
                        width_pt: 1.5,
                        dashed: true,
                    });
                    if sp > 0.4 + fi * 0.2 {
                        let angle = (sp * 10.0 + fi) * TAU;
                        let center = OrbitShape::circle(radius).point_at(angle);
                        self.plain(center, 0.2, palette.electron, 1.0);
                    }
                }
            }
            Style::Enhanced => {
                self.glowing(Vec3::ZERO, 1.0, palette.nucleus, 2.0, 0.2);
                if sp <= 0.2 {
                    return;
                }
                for i in 0..3 {
                    let fi = f64::from(i);
                    let shape = OrbitShape::ellipse(2.5 + fi * 1.5, 2.0 + fi * 1.2, 0.8 + fi * 0.5);
                    if sp <= 0.2 + fi * 0.15 {
                        continue;
                    }
                    self.scene.push(Orbit {
                        shape: shape.rotated_z(fi * PI / 6.0),
                        color: palette.orbit,
                        opacity: self.ta * 0.5,
                        width_pt: 2.0,
                        dashed: true,
                    });
                    if sp > 0.3 + fi * 0.15 {
                        // Electron rides the unrotated ellipse.
                        let center = shape.point_at((p * 10.0 + fi) * TAU);
                        self.glowing(center, 0.4, palette.electron, 1.5, 0.2);
                    }
                }
            }
        }
    }

    fn bohr(&mut self) {
        let sp = self.sp();
        let p = self.clock.progress;
        let palette = self.cfg.palette;
        let style = self.style();
        self.headings(1.0);
        match style {
            Style::Classic => self.description((sp * 3.0).min(1.0), 1.0),
            Style::Enhanced => {
                let t = (sp * 3.0).min(1.0);
                self.description(t, t);
            }
        }

        if sp <= 0.1 {
            return;
        }
        match style {
            Style::Classic => self.plain(Vec3::ZERO, 0.5, palette.nucleus, 1.0),
            Style::Enhanced => self.glowing(Vec3::ZERO, 1.0, palette.nucleus, 2.0, 0.2),
        }

        let step = match style {
            Style::Classic => 0.2,
            Style::Enhanced => 0.15,
        };
        for i in 0..3u8 {
            let fi = f64::from(i);
            if sp <= 0.2 + fi * step {
                continue;
            }
            let (radius, shape, opacity, width_pt, label_z, label_pt, label_opacity) = match style
            {
                Style::Classic => {
                    let r = 1.0 + fi * 1.5;
                    (r, OrbitShape::circle(r), 0.7, 2.0, 0.3, 10.0, 1.0)
                }
                Style::Enhanced => {
                    let r = 1.5 + fi * 2.0;
                    (
                        r,
                        OrbitShape::ellipse(r, r * 0.9, r * 0.3).rotated_z(fi * PI / 8.0),
                        self.ta * 0.7,
                        2.5,
                        0.5,
                        self.look.label_pt,
                        self.ta,
                    )
                }
            };
            self.scene.push(Orbit {
                shape,
                color: palette.orbit,
                opacity,
                width_pt,
                dashed: false,
            });
            if sp > 0.3 + fi * step {
                self.label(
                    Vec3::new(radius, 0.0, label_z),
                    format!("n={}", i + 1),
                    palette.text,
                    label_pt,
                    label_opacity,
                );
            }
        }

        let Some(electron) = bohr_electron(style, sp, p) else {
            return;
        };
        match style {
            Style::Classic => self.plain(electron, 0.2, palette.electron, 1.0),
            Style::Enhanced => self.glowing(electron, 0.5, palette.electron, 1.8, 0.2),
        }

        if let Some(cue) = photon_cue(style, sp, electron) {
            let width_pt = match style {
                Style::Classic => 3.0,
                Style::Enhanced => 4.0,
            };
            self.scene.push(Segment {
                from: cue.from,
                to: cue.to,
                color: palette.highlight,
                opacity: cue.opacity,
                width_pt,
            });
            self.label(
                cue.label_at,
                "Photon emitted".to_owned(),
                palette.highlight,
                self.look.photon_pt,
                cue.label_opacity,
            );
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Glow {
    factor: f64,
    opacity: f64,
}

#[derive(Clone, Copy, Debug)]
struct ParticleSpec {
    center: Vec3,
    radius: f64,
    color: Rgba8,
    opacity: f64,
    shading: Shading,
    glow: Option<Glow>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
