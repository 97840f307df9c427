//! atomreel renders a short educational animation of four historical atomic models (Dalton,
//! Thomson, Rutherford and Bohr) and muxes it with a background track.
//!
//! Every frame is a pure function of the configuration and the frame index:
//!
//! - [`compose_frame`] maps a frame to a [`Scene`] (spheres, orbits, labels, overlay text and
//!   a camera pose)
//! - a [`RenderBackend`] rasterizes the scene on the CPU
//! - frames stream in order into a [`FrameSink`], usually `ffmpeg`
//!
//! [`run`] chains audio preparation, rendering, encoding and muxing.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Background audio decoding and trimming.
pub mod audio;
pub mod config;
/// Encoding sinks and muxing.
pub mod encode;
pub mod pipeline;
/// Rendering backend(s).
pub mod render;
pub mod scene;
pub mod timeline;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Vec3};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::foundation::math::{clamp01, lerp};

pub use crate::audio::prepare::{AudioPcm, PreparedAudio, prepare_audio, trim_pcm};
pub use crate::config::{Palette, Style, VideoConfig};
pub use crate::encode::encoder::{Encoder, FfmpegEncoder};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::mux::{MuxJob, mux_args, mux_duration};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::pipeline::{PipelineReport, render_settings, render_still, run};
pub use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, render_frame, render_frames, render_range,
};
pub use crate::scene::compose::{compose_at, compose_frame};
pub use crate::scene::model::Scene;
pub use crate::timeline::{
    CameraPose, Section, SectionClock, animate_text, camera_pose, progress, section_progress,
};
