use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ReelError, ReelResult};

/// Sample rate of the prepared intermediate.
pub const PREP_SAMPLE_RATE: u32 = 48_000;
/// Channel count of the prepared intermediate.
pub const PREP_CHANNELS: u16 = 2;

/// Decoded interleaved PCM.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioPcm {
    /// Channel count.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved samples, `channels` per frame.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.channels == 0 || self.sample_rate == 0 {
            return 0.0;
        }
        let frames = self.interleaved_f32.len() / usize::from(self.channels);
        frames as f64 / f64::from(self.sample_rate)
    }
}

/// A raw `f32le` file ready to be muxed.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedAudio {
    /// Location of the intermediate.
    pub path: PathBuf,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Length of the written audio in seconds.
    pub duration_secs: f64,
}

/// `ffmpeg` arguments decoding `path` to raw stereo `f32le` on stdout.
///
/// With `max_secs`, decoding stops after that many seconds of output.
pub fn decode_args(path: &Path, sample_rate: u32, max_secs: Option<f64>) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-v", "error", "-i"].map(OsString::from).into();
    args.push(path.as_os_str().to_owned());
    args.push("-vn".into());
    if let Some(secs) = max_secs {
        args.push("-t".into());
        args.push(format!("{:.6}", secs.max(0.0)).into());
    }
    for a in ["-f", "f32le", "-acodec", "pcm_f32le", "-ac", "2", "-ar"] {
        args.push(a.into());
    }
    args.push(sample_rate.to_string().into());
    args.push("pipe:1".into());
    args
}

/// Decode `path` to stereo interleaved `f32` PCM at `sample_rate` using the system `ffmpeg`.
///
/// `max_secs` bounds how much is decoded; [`trim_pcm`] still fixes the exact length.
pub fn decode_audio_f32_stereo(
    path: &Path,
    sample_rate: u32,
    max_secs: Option<f64>,
) -> ReelResult<AudioPcm> {
    let out = std::process::Command::new("ffmpeg")
        .args(decode_args(path, sample_rate, max_secs))
        .output()
        .map_err(|e| ReelError::encode(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        let msg = String::from_utf8_lossy(&out.stderr);
        return Err(ReelError::audio(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            msg.trim()
        )));
    }

    if !out.stdout.len().is_multiple_of(4) {
        return Err(ReelError::audio(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    let interleaved_f32 = out
        .stdout
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(AudioPcm {
        channels: PREP_CHANNELS,
        sample_rate,
        interleaved_f32,
    })
}

/// Keep at most the first `max_secs` seconds of `pcm`. Shorter input is returned unchanged.
pub fn trim_pcm(mut pcm: AudioPcm, max_secs: f64) -> AudioPcm {
    let max_frames = (max_secs.max(0.0) * f64::from(pcm.sample_rate)).round() as usize;
    let max_samples = max_frames.saturating_mul(usize::from(pcm.channels));
    pcm.interleaved_f32.truncate(max_samples);
    pcm
}

/// Write interleaved samples as raw little-endian `f32`.
pub fn write_f32le(samples_interleaved: &[f32], out_path: &Path) -> ReelResult<()> {
    crate::encode::ffmpeg::ensure_parent_dir(out_path)?;
    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        ReelError::audio(format!(
            "failed to write prepared audio '{}': {e}",
            out_path.display()
        ))
    })
}

/// Decode `source` with `decode`, keep its first `target_secs` seconds and write them to
/// `out_path`.
///
/// `decode` receives `target_secs` so it can stop early.
///
/// A missing source is reported as [`ReelError::Audio`] without calling `decode`.
#[tracing::instrument(skip_all, fields(source = %source.display(), target_secs = target_secs))]
pub fn prepare_audio<F>(
    source: &Path,
    target_secs: f64,
    out_path: &Path,
    decode: F,
) -> ReelResult<PreparedAudio>
where
    F: FnOnce(&Path, f64) -> ReelResult<AudioPcm>,
{
    if !source.is_file() {
        return Err(ReelError::audio(format!(
            "background audio '{}' not found",
            source.display()
        )));
    }

    let pcm = decode(source, target_secs)?;
    if pcm.channels == 0 || pcm.sample_rate == 0 {
        return Err(ReelError::audio(format!(
            "decoded audio '{}' has no channels or sample rate",
            source.display()
        )));
    }
    let source_secs = pcm.duration_secs();
    let pcm = trim_pcm(pcm, target_secs);
    let duration_secs = pcm.duration_secs();
    tracing::info!(source_secs, duration_secs, "audio prepared");

    write_f32le(&pcm.interleaved_f32, out_path)?;
    Ok(PreparedAudio {
        path: out_path.to_path_buf(),
        sample_rate: pcm.sample_rate,
        channels: pcm.channels,
        duration_secs,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/prepare.rs"]
mod tests;
