use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::audio::prepare::PreparedAudio;
use crate::encode::ffmpeg::{ensure_parent_dir, is_ffmpeg_on_path};
use crate::foundation::error::{ReelError, ReelResult};

/// One video and one audio stream to combine into the final file.
#[derive(Clone, Debug, PartialEq)]
pub struct MuxJob {
    /// Silent encoded video.
    pub video: PathBuf,
    /// Prepared raw audio.
    pub audio: PreparedAudio,
    /// Final container path.
    pub out: PathBuf,
}

/// Length of the muxed output: the shorter of the two streams.
pub fn mux_duration(video_secs: f64, audio_secs: f64) -> f64 {
    video_secs.min(audio_secs)
}

/// `ffmpeg` arguments combining `job.video` and `job.audio` into `job.out`.
///
/// The output is cut to the shorter stream (`-shortest`).
pub fn mux_args(job: &MuxJob) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-loglevel", "error", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(job.video.clone().into_os_string());
    args.extend(
        [
            "-f".to_owned(),
            "f32le".to_owned(),
            "-ar".to_owned(),
            job.audio.sample_rate.to_string(),
            "-ac".to_owned(),
            job.audio.channels.to_string(),
            "-i".to_owned(),
        ]
        .map(OsString::from),
    );
    args.push(job.audio.path.clone().into_os_string());
    args.extend(
        [
            "-c:v",
            "libx264",
            "-c:a",
            "aac",
            "-strict",
            "experimental",
            "-map",
            "0:v:0",
            "-map",
            "1:a:0",
            "-shortest",
            "-movflags",
            "+faststart",
            "-pix_fmt",
            "yuv420p",
        ]
        .map(OsString::from),
    );
    args.push(job.out.clone().into_os_string());
    args
}

/// Run the mux with the system `ffmpeg`; a failure carries its stderr.
#[tracing::instrument(skip_all, fields(out = %job.out.display()))]
pub fn run_mux(job: &MuxJob) -> ReelResult<()> {
    if job.audio.sample_rate == 0 || job.audio.channels == 0 {
        return Err(ReelError::validation(
            "audio sample_rate and channels must be non-zero",
        ));
    }
    if !is_ffmpeg_on_path() {
        return Err(ReelError::encode(
            "ffmpeg is required for muxing, but was not found on PATH",
        ));
    }
    ensure_parent_dir(&job.out)?;

    let out = Command::new("ffmpeg")
        .args(mux_args(job))
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ReelError::encode(format!("failed to spawn ffmpeg for mux: {e}")))?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        return Err(ReelError::encode(format!(
            "ffmpeg mux exited with status {}: {}",
            out.status,
            stderr.trim()
        )));
    }
    tracing::info!("mux finished");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mux.rs"]
mod tests;
