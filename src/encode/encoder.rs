use std::path::Path;

use crate::audio::prepare::{AudioPcm, PREP_SAMPLE_RATE, decode_audio_f32_stereo};
use crate::config::VideoConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::mux::{MuxJob, run_mux};
use crate::encode::sink::FrameSink;
use crate::foundation::error::ReelResult;

/// Everything the pipeline needs from an external media tool.
///
/// [`FfmpegEncoder`] drives the system `ffmpeg`; tests substitute fakes that record calls and
/// write placeholder files.
pub trait Encoder {
    /// Decode a compressed audio file to interleaved PCM.
    ///
    /// Output past `max_secs` is not needed and may be omitted.
    fn decode_audio(&self, source: &Path, max_secs: f64) -> ReelResult<AudioPcm>;

    /// Sink that encodes frames into a silent video at `path`.
    fn video_sink(&self, path: &Path, cfg: &VideoConfig) -> ReelResult<Box<dyn FrameSink>>;

    /// Combine video and audio into the final container.
    fn mux(&self, job: &MuxJob) -> ReelResult<()>;
}

/// Production [`Encoder`] backed by the `ffmpeg` executable on `PATH`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegEncoder;

impl Encoder for FfmpegEncoder {
    fn decode_audio(&self, source: &Path, max_secs: f64) -> ReelResult<AudioPcm> {
        decode_audio_f32_stereo(source, PREP_SAMPLE_RATE, Some(max_secs))
    }

    fn video_sink(&self, path: &Path, cfg: &VideoConfig) -> ReelResult<Box<dyn FrameSink>> {
        let bg = cfg.palette.background;
        Ok(Box::new(FfmpegSink::new(FfmpegSinkOpts {
            bg_rgba: [bg.r, bg.g, bg.b, 255],
            crf: cfg.crf,
            preset: cfg.preset.clone(),
            bitrate_kbps: cfg.bitrate_kbps(),
            ..FfmpegSinkOpts::new(path)
        })))
    }

    fn mux(&self, job: &MuxJob) -> ReelResult<()> {
        run_mux(job)
    }
}
