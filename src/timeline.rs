//! Time math shared by every frame: progress, sections, camera pose and text reveal.
//!
//! All functions here are pure. A frame's visuals depend only on its index and the immutable
//! configuration, never on previously rendered frames.

use crate::config::Style;
use crate::foundation::core::FrameIndex;
use crate::foundation::math::clamp01;

/// Number of narrative sections (one per atomic model).
pub const SECTION_COUNT: u32 = 4;

/// Normalized position of `frame` in the animation: `frame / total_frames`.
///
/// In `[0, 1)` for every frame inside the timeline.
pub fn progress(frame: FrameIndex, total_frames: u64) -> f64 {
    if total_frames == 0 {
        return 0.0;
    }
    frame.0 as f64 / total_frames as f64
}

/// One of the four historical atomic models, in narrative order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    /// Dalton's solid-sphere model (1803).
    Dalton,
    /// Thomson's plum pudding model (1904).
    Thomson,
    /// Rutherford's nuclear model (1911).
    Rutherford,
    /// Bohr's quantized-orbit model (1913).
    Bohr,
}

impl Section {
    /// All sections in timeline order.
    pub const ALL: [Self; 4] = [Self::Dalton, Self::Thomson, Self::Rutherford, Self::Bohr];

    /// Section for a global progress value: `floor(progress × 4)`.
    ///
    /// Progress at or beyond 1 stays in the last section.
    pub fn from_progress(progress: f64) -> Self {
        let idx = (clamp01(progress) * f64::from(SECTION_COUNT)).floor() as usize;
        Self::ALL[idx.min(Self::ALL.len() - 1)]
    }

    /// Year the model was proposed.
    pub fn year(self) -> u16 {
        match self {
            Self::Dalton => 1803,
            Self::Thomson => 1904,
            Self::Rutherford => 1911,
            Self::Bohr => 1913,
        }
    }
}

/// Position within the current section: `(progress × 4) mod 1`.
pub fn section_progress(progress: f64) -> f64 {
    (progress * f64::from(SECTION_COUNT)).rem_euclid(1.0)
}

/// Global and section-local time of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionClock {
    /// Global progress in `[0, 1)`.
    pub progress: f64,
    /// Active section.
    pub section: Section,
    /// Section-local progress in `[0, 1)`.
    pub local: f64,
}

impl SectionClock {
    /// Clock for a raw progress value.
    pub fn at_progress(progress: f64) -> Self {
        Self {
            progress,
            section: Section::from_progress(progress),
            local: section_progress(progress),
        }
    }

    /// Clock for a frame of a timeline with `total_frames` frames.
    pub fn at_frame(frame: FrameIndex, total_frames: u64) -> Self {
        Self::at_progress(progress(frame, total_frames))
    }
}

/// Camera orientation in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Angle above the `xy` plane.
    pub elevation_deg: f64,
    /// Rotation around the `z` axis.
    pub azimuth_deg: f64,
}

/// Camera pose for a progress value: sinusoidal elevation, one full azimuth sweep.
pub fn camera_pose(style: Style, progress: f64) -> CameraPose {
    use std::f64::consts::PI;

    let elevation_deg = match style {
        Style::Classic => 15.0 + 10.0 * (progress * PI / 2.0).sin(),
        Style::Enhanced => 20.0 + 10.0 * (progress * PI / 3.0).sin(),
    };
    CameraPose {
        elevation_deg,
        azimuth_deg: progress * 360.0,
    }
}

/// Geometry fade at section edges.
///
/// Enhanced ramps in over the first tenth of a section and out over the last tenth; classic
/// has no fades.
pub fn transition_alpha(style: Style, local: f64) -> f64 {
    match style {
        Style::Classic => 1.0,
        Style::Enhanced => {
            if local < 0.1 {
                local * 10.0
            } else if local > 0.9 {
                (1.0 - local) * 10.0
            } else {
                1.0
            }
        }
    }
}

/// Reveal `text` character by character: the first `floor(clamp(p, 0, 1) × len)` characters.
///
/// Length is counted in `char`s, so multi-byte characters are never split.
pub fn animate_text(text: &str, p: f64) -> &str {
    let len = text.chars().count();
    let shown = (clamp01(p) * len as f64).floor() as usize;
    match text.char_indices().nth(shown) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
#[path = "../tests/unit/timeline.rs"]
mod tests;
