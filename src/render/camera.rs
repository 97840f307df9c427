//! World to screen projection.
//!
//! World coordinates are first normalized by the scene's half-extent, so the visible cube is
//! `[-1, 1]³` regardless of style. The camera sits on a sphere around the origin at the pose's
//! elevation and azimuth, looking at the origin with `z` up.

use crate::foundation::core::{Canvas, Point, Vec3};
use crate::timeline::CameraPose;

/// Distance from the camera to the origin, in normalized units.
const CAMERA_DISTANCE: f64 = 10.0;
/// Fraction of the shorter canvas side covered by one normalized unit at the origin.
const ZOOM: f64 = 0.36;
/// Figure resolution the point sizes are authored against.
const REFERENCE_DPI: f64 = 100.0;
/// Canvas width the point sizes are authored against.
const REFERENCE_WIDTH: f64 = 1080.0;

/// Pixels per typographic point on `canvas`.
///
/// At the reference 1080 px width one point is `100 / 72` pixels; other widths scale linearly
/// so a frame looks the same at any resolution.
pub fn px_per_pt(canvas: Canvas) -> f64 {
    REFERENCE_DPI / 72.0 * f64::from(canvas.width) / REFERENCE_WIDTH
}

/// A projected point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Screen position in pixels, origin top-left, `y` down.
    pub point: Point,
    /// Distance from the camera along the view direction; larger is farther.
    pub depth: f64,
    /// Pixels per world unit at this depth.
    pub px_per_unit: f64,
}

/// Perspective camera for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    center: Point,
    scale: f64,
    extent: f64,
    eye: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Projector {
    /// Camera for `pose` framing a world cube of half-size `world_extent` on `canvas`.
    pub fn new(canvas: Canvas, pose: CameraPose, world_extent: f64) -> Self {
        let el = pose.elevation_deg.to_radians();
        let az = pose.azimuth_deg.to_radians();
        let (sel, cel) = el.sin_cos();
        let (saz, caz) = az.sin_cos();

        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        Self {
            center: Point::new(w / 2.0, h / 2.0),
            scale: w.min(h) * ZOOM,
            extent: if world_extent > 0.0 { world_extent } else { 1.0 },
            eye: Vec3::new(cel * caz, cel * saz, sel),
            right: Vec3::new(-saz, caz, 0.0),
            up: Vec3::new(-sel * caz, -sel * saz, cel),
        }
    }

    /// Unit vector from the origin towards the camera.
    pub fn eye_dir(&self) -> Vec3 {
        self.eye
    }

    /// Direction light arrives from: above and to the left of the viewer.
    pub fn light_dir(&self) -> Vec3 {
        (self.eye * 0.7 + self.up * 0.6 - self.right * 0.4).normalized()
    }

    /// View depth of a world point.
    pub fn depth(&self, p: Vec3) -> f64 {
        CAMERA_DISTANCE - (p * (1.0 / self.extent)).dot(self.eye)
    }

    /// Project a world point onto the canvas.
    pub fn project(&self, p: Vec3) -> Projected {
        let q = p * (1.0 / self.extent);
        let depth = (CAMERA_DISTANCE - q.dot(self.eye)).max(1e-3);
        let persp = CAMERA_DISTANCE / depth;
        let k = self.scale * persp;
        Projected {
            point: Point::new(
                self.center.x + q.dot(self.right) * k,
                self.center.y - q.dot(self.up) * k,
            ),
            depth,
            px_per_unit: k / self.extent,
        }
    }

    /// Whether a surface with outward normal `n` at world point `p` faces the camera.
    pub fn faces_camera(&self, p: Vec3, n: Vec3) -> bool {
        let cam = self.eye * (CAMERA_DISTANCE * self.extent);
        (cam - p).dot(n) > 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/camera.rs"]
mod tests;
