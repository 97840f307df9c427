//! Turning [`Scene`](crate::scene::model::Scene) values into pixels.

/// Backend trait, frame buffer and settings.
pub mod backend;
/// Perspective projection and lighting direction.
pub mod camera;
/// `vello_cpu` rasterizer.
pub mod cpu;
/// Frame and range rendering, sequential or chunked over rayon.
pub mod pipeline;
/// Font loading and Parley text layout.
pub mod text;
