//! The four stages of a render: audio preparation, frame synthesis, video encoding and muxing.
//!
//! Stages run strictly in sequence and only share the two intermediate files. Intermediates are
//! removed after a successful mux; on any error they are left where they are.

use std::path::{Path, PathBuf};

use crate::audio::prepare::prepare_audio;
use crate::config::VideoConfig;
use crate::encode::encoder::Encoder;
use crate::encode::mux::{MuxJob, mux_duration};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::{BackendKind, FrameRGBA, RenderSettings, create_backend};
use crate::render::pipeline::{RenderStats, RenderThreading, render_frame, render_range};
use crate::render::text::resolve_font;

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineReport {
    /// Final video path.
    pub out_path: PathBuf,
    /// Frame counters from the render stage.
    pub stats: RenderStats,
    /// Length of the rendered video stream in seconds.
    pub video_secs: f64,
    /// Length of the prepared audio in seconds.
    pub audio_secs: f64,
    /// Length of the muxed output in seconds.
    pub duration_secs: f64,
}

/// Build render settings for `cfg`, loading the font used for overlays and labels.
///
/// Without a configured font and without any system font, text is skipped with a warning.
pub fn render_settings(cfg: &VideoConfig) -> ReelResult<RenderSettings> {
    let font_bytes = resolve_font(cfg.font_path.as_deref())?;
    if font_bytes.is_none() {
        tracing::warn!("no usable system font found; titles and labels will not be drawn");
    }
    Ok(RenderSettings {
        canvas: cfg.canvas,
        font_bytes,
    })
}

/// Render one frame of the full animation on the CPU backend.
pub fn render_still(cfg: &VideoConfig, frame: FrameIndex) -> ReelResult<FrameRGBA> {
    cfg.validate()?;
    if frame.0 >= cfg.total_frames() {
        return Err(ReelError::validation(format!(
            "frame {} is out of range (total frames: {})",
            frame.0,
            cfg.total_frames()
        )));
    }
    let settings = render_settings(cfg)?;
    let mut backend = create_backend(BackendKind::Cpu, &settings)?;
    render_frame(cfg, frame, backend.as_mut())
}

/// Produce the final video described by `cfg`.
///
/// Missing background audio fails before any frame is rendered.
#[tracing::instrument(skip_all, fields(style = ?cfg.style, out = %cfg.output_path().display()))]
pub fn run(
    cfg: &VideoConfig,
    encoder: &dyn Encoder,
    threading: &RenderThreading,
) -> ReelResult<PipelineReport> {
    cfg.validate()?;
    let out_path = cfg.output_path();
    let temp_video = cfg.temp_video_path();
    let temp_audio = cfg.temp_audio_path();

    tracing::info!(source = %cfg.audio_path.display(), "preparing audio");
    let audio = prepare_audio(
        &cfg.audio_path,
        cfg.duration_secs_f64(),
        &temp_audio,
        |p, secs| encoder.decode_audio(p, secs),
    )?;

    let settings = render_settings(cfg)?;
    let mut backend = create_backend(BackendKind::Cpu, &settings)?;
    tracing::info!(
        frames = cfg.total_frames(),
        width = cfg.canvas.width,
        height = cfg.canvas.height,
        "rendering frames"
    );
    let mut sink = encoder.video_sink(&temp_video, cfg)?;
    let stats = render_range(
        cfg,
        cfg.frame_range(),
        backend.as_mut(),
        sink.as_mut(),
        threading,
    )?;
    let video_secs = cfg.fps.frames_to_secs(stats.frames_total);

    tracing::info!("muxing audio and video");
    let job = MuxJob {
        video: temp_video.clone(),
        audio: audio.clone(),
        out: out_path.clone(),
    };
    encoder.mux(&job)?;

    remove_intermediate(&temp_video);
    remove_intermediate(&temp_audio);

    Ok(PipelineReport {
        out_path,
        stats,
        video_secs,
        audio_secs: audio.duration_secs,
        duration_secs: mux_duration(video_secs, audio.duration_secs),
    })
}

fn remove_intermediate(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove intermediate file");
    }
}
