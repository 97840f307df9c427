//! Immutable render configuration.
//!
//! A [`VideoConfig`] is built once (defaults, optionally overlaid with a JSON file and CLI flags)
//! and passed by reference into scene composition, rendering and encoding. Nothing downstream
//! mutates it.

use std::path::{Path, PathBuf};

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};

/// Default video length in seconds (30 s per atomic model).
pub const VIDEO_DURATION_SECS: u32 = 120;
/// Default frame rate.
pub const VIDEO_FPS: u32 = 30;
/// Default output width (vertical 9:16).
pub const VIDEO_WIDTH: u32 = 1080;
/// Default output height (vertical 9:16).
pub const VIDEO_HEIGHT: u32 = 1920;
/// Default background track.
pub const AUDIO_FILE: &str = "music.mp3";
/// Seed used for the plum-pudding electron layout.
pub const LAYOUT_SEED: u64 = 42;

const TEMP_VIDEO_FILE: &str = "temp_video.mp4";
const TEMP_AUDIO_FILE: &str = "temp_audio.f32le";

/// Visual parameter set.
///
/// `Classic` reproduces the plain first cut of the animation; `Enhanced` adds glow, elliptical
/// orbits, section fades and a separate subtitle line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Flat spheres, circular orbits, year inside the title.
    #[default]
    Classic,
    /// Glowing particles, elliptical 3D orbits, fades between sections.
    Enhanced,
}

impl Style {
    /// Output file name used when no explicit output path is configured.
    pub fn default_output_name(self) -> &'static str {
        match self {
            Self::Classic => "atomic_models_animation.mp4",
            Self::Enhanced => "atomic_models_animation_enhanced.mp4",
        }
    }

    /// Encoder bitrate used when none is configured.
    pub fn default_bitrate_kbps(self) -> u32 {
        match self {
            Self::Classic => 10_000,
            Self::Enhanced => 12_000,
        }
    }

    /// Message printed once the final file is written.
    pub fn completion_message(self, out: &Path) -> String {
        match self {
            Self::Classic => format!(
                "Atomic models animation complete! Saved to {}",
                out.display()
            ),
            Self::Enhanced => format!(
                "Enhanced atomic models animation complete! Saved to {}",
                out.display()
            ),
        }
    }
}

/// Named colors used by the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Frame background.
    pub background: Rgba8,
    /// Title, description and labels.
    pub text: Rgba8,
    /// Electrons.
    pub electron: Rgba8,
    /// Protons (first Dalton atom).
    pub proton: Rgba8,
    /// Neutrons (third Dalton atom).
    pub neutron: Rgba8,
    /// Nucleus and the Thomson "pudding".
    pub nucleus: Rgba8,
    /// Orbit curves.
    pub orbit: Rgba8,
    /// Subtitle and photon cue.
    pub highlight: Rgba8,
    /// Glow halos.
    pub glow: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(0x12, 0x12, 0x12),
            text: Rgba8::rgb(0xFF, 0xFF, 0xFF),
            electron: Rgba8::rgb(0x42, 0x85, 0xF4),
            proton: Rgba8::rgb(0xEA, 0x43, 0x35),
            neutron: Rgba8::rgb(0x34, 0xA8, 0x53),
            nucleus: Rgba8::rgb(0xFB, 0xBC, 0x05),
            orbit: Rgba8::rgb(0x9C, 0x27, 0xB0),
            highlight: Rgba8::rgb(0x00, 0xAC, 0xC1),
            glow: Rgba8::rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

/// Full configuration of one render.
///
/// Every field has a default, so a JSON overlay only needs the keys it changes:
///
/// ```json
/// { "style": "enhanced", "duration_secs": 8, "canvas": { "width": 540, "height": 960 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoConfig {
    /// Visual parameter set.
    pub style: Style,
    /// Total animation length in seconds.
    pub duration_secs: u32,
    /// Output frame rate.
    pub fps: Fps,
    /// Output resolution.
    pub canvas: Canvas,
    /// Seed for pseudo-random particle placement.
    pub seed: u64,
    /// Colors.
    pub palette: Palette,
    /// Background audio source.
    pub audio_path: PathBuf,
    /// Final output path; defaults to a style-specific name in the working directory.
    pub out_path: Option<PathBuf>,
    /// Directory for intermediate files; defaults to the output's parent directory.
    pub work_dir: Option<PathBuf>,
    /// Font file for all text; defaults to a sans-serif face from the system font database.
    pub font_path: Option<PathBuf>,
    /// Video bitrate; defaults per style.
    pub video_bitrate_kbps: Option<u32>,
    /// x264 constant rate factor.
    pub crf: u8,
    /// x264 preset name.
    pub preset: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            style: Style::Classic,
            duration_secs: VIDEO_DURATION_SECS,
            fps: Fps {
                num: VIDEO_FPS,
                den: 1,
            },
            canvas: Canvas {
                width: VIDEO_WIDTH,
                height: VIDEO_HEIGHT,
            },
            seed: LAYOUT_SEED,
            palette: Palette::default(),
            audio_path: PathBuf::from(AUDIO_FILE),
            out_path: None,
            work_dir: None,
            font_path: None,
            video_bitrate_kbps: None,
            crf: 18,
            preset: "slow".to_owned(),
        }
    }
}

impl VideoConfig {
    /// Default configuration for `style`.
    pub fn new(style: Style) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Parse a JSON overlay; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| ReelError::validation(format!("invalid config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON overlay from disk.
    pub fn from_json_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check invariants required by the renderer and the encoder.
    pub fn validate(&self) -> ReelResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration_secs == 0 {
            return Err(ReelError::validation("duration_secs must be > 0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be non-zero"));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(ReelError::validation("canvas width/height must fit in u16"));
        }
        if !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.total_frames() == 0 {
            return Err(ReelError::validation("duration and fps yield zero frames"));
        }
        if self.crf > 51 {
            return Err(ReelError::validation("crf must be within 0..=51"));
        }
        if self.preset.trim().is_empty() {
            return Err(ReelError::validation("preset must not be empty"));
        }
        if self.video_bitrate_kbps == Some(0) {
            return Err(ReelError::validation("video_bitrate_kbps must be > 0 when set"));
        }
        Ok(())
    }

    /// Total frame count (`duration × fps`).
    pub fn total_frames(&self) -> u64 {
        self.fps.secs_to_frames_floor(f64::from(self.duration_secs))
    }

    /// The full timeline `[0, total_frames)`.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames()),
        }
    }

    /// Target duration in seconds.
    pub fn duration_secs_f64(&self) -> f64 {
        f64::from(self.duration_secs)
    }

    /// Final output path.
    pub fn output_path(&self) -> PathBuf {
        self.out_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.style.default_output_name()))
    }

    /// Directory holding the intermediate files.
    pub fn work_dir(&self) -> PathBuf {
        if let Some(dir) = &self.work_dir {
            return dir.clone();
        }
        match self.output_path().parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Intermediate silent video.
    pub fn temp_video_path(&self) -> PathBuf {
        self.work_dir().join(TEMP_VIDEO_FILE)
    }

    /// Intermediate raw PCM audio.
    pub fn temp_audio_path(&self) -> PathBuf {
        self.work_dir().join(TEMP_AUDIO_FILE)
    }

    /// Effective video bitrate.
    pub fn bitrate_kbps(&self) -> u32 {
        self.video_bitrate_kbps
            .unwrap_or_else(|| self.style.default_bitrate_kbps())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
