//! Closed-form geometry for spheres and orbit curves.

use std::f64::consts::{PI, TAU};

use crate::foundation::core::Vec3;
use crate::foundation::math::linspace;

/// Samples taken along an orbit curve.
pub const ORBIT_RESOLUTION: usize = 100;

/// A sphere sampled on a `(u, v)` grid, `u ∈ [0, 2π]` around the vertical axis and
/// `v ∈ [0, π]` from the north pole down.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereMesh {
    center: Vec3,
    resolution: usize,
    points: Vec<Vec3>,
}

/// One quadrilateral patch of a [`SphereMesh`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereFace {
    /// Corners in winding order.
    pub corners: [Vec3; 4],
    /// Mean of the corners.
    pub centroid: Vec3,
    /// Outward unit normal.
    pub normal: Vec3,
    /// Normalized height of the patch on the sphere: 0 at the top, 1 at the bottom.
    pub v: f64,
}

impl SphereMesh {
    /// Tessellate a sphere with `resolution` samples on each angular parameter.
    ///
    /// Resolutions below 3 are raised to 3 so the mesh always has a volume.
    pub fn new(center: Vec3, radius: f64, resolution: usize) -> Self {
        let n = resolution.max(3);
        let us: Vec<f64> = linspace(0.0, TAU, n).collect();
        let vs: Vec<f64> = linspace(0.0, PI, n).collect();

        let mut points = Vec::with_capacity(n * n);
        for &u in &us {
            let (su, cu) = u.sin_cos();
            for &v in &vs {
                let (sv, cv) = v.sin_cos();
                points.push(center + Vec3::new(cu * sv, su * sv, cv) * radius);
            }
        }

        Self {
            center,
            resolution: n,
            points,
        }
    }

    /// Samples per angular parameter.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Grid point at `(u index, v index)`.
    pub fn point(&self, iu: usize, iv: usize) -> Vec3 {
        self.points[iu * self.resolution + iv]
    }

    /// All grid points, `u`-major.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Patches between neighboring grid samples, `(resolution - 1)²` in total.
    pub fn faces(&self) -> impl Iterator<Item = SphereFace> + '_ {
        let n = self.resolution;
        (0..n - 1).flat_map(move |iu| {
            (0..n - 1).map(move |iv| {
                let corners = [
                    self.point(iu, iv),
                    self.point(iu + 1, iv),
                    self.point(iu + 1, iv + 1),
                    self.point(iu, iv + 1),
                ];
                let centroid = (corners[0] + corners[1] + corners[2] + corners[3]) * 0.25;
                SphereFace {
                    corners,
                    centroid,
                    normal: (centroid - self.center).normalized(),
                    v: (iv as f64 + 0.5) / (n - 1) as f64,
                }
            })
        })
    }
}

/// Parametric orbit `(a cos θ, b sin θ, c sin(θ/2))`, rotated about the `z` axis.
///
/// Circles are the `a = b`, `c = 0` case.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitShape {
    /// Semi-axis along x before rotation.
    pub a: f64,
    /// Semi-axis along y before rotation.
    pub b: f64,
    /// Amplitude of the vertical wobble.
    pub c: f64,
    /// Rotation about `z` in radians.
    pub rotation: f64,
}

impl OrbitShape {
    /// Flat circle of radius `r` in the `xy` plane.
    pub fn circle(r: f64) -> Self {
        Self::ellipse(r, r, 0.0)
    }

    /// Elliptical orbit with vertical wobble `c`.
    pub fn ellipse(a: f64, b: f64, c: f64) -> Self {
        Self {
            a,
            b,
            c,
            rotation: 0.0,
        }
    }

    /// Same curve rotated about `z` by `angle` radians.
    pub fn rotated_z(self, angle: f64) -> Self {
        Self {
            rotation: angle,
            ..self
        }
    }

    /// Point on the curve at parameter `theta`.
    pub fn point_at(&self, theta: f64) -> Vec3 {
        let p = Vec3::new(
            self.a * theta.cos(),
            self.b * theta.sin(),
            self.c * (theta / 2.0).sin(),
        );
        if self.rotation == 0.0 {
            p
        } else {
            p.rotate_z(self.rotation)
        }
    }

    /// `resolution` points evenly spaced in `θ ∈ [0, 2π]`, both ends included.
    pub fn sample(&self, resolution: usize) -> Vec<Vec3> {
        linspace(0.0, TAU, resolution)
            .map(|t| self.point_at(t))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;
