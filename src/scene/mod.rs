//! Per-frame scene description.
//!
//! A [`model::Scene`] is the boundary between "what is on screen at this instant" and "how it
//! becomes pixels": composition builds one per frame, render backends consume it.

/// Frame composition for every section.
pub mod compose;
/// Sphere tessellation and orbit curves.
pub mod geometry;
/// Scene value types.
pub mod model;
/// Section titles and descriptions.
pub mod narrative;
