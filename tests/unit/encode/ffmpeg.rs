use super::*;

use crate::foundation::core::Fps;

fn sink_cfg() -> SinkConfig {
    SinkConfig {
        width: 1080,
        height: 1920,
        fps: Fps { num: 30, den: 1 },
    }
}

fn args_as_strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0; 4], [0, 0, 0, 255]).is_err());
}

#[test]
fn encode_args_follow_the_quality_settings() {
    let opts = FfmpegSinkOpts {
        bitrate_kbps: 12_000,
        ..FfmpegSinkOpts::new("out/temp_video.mp4")
    };
    let args = args_as_strings(&encode_args(&opts, &sink_cfg()));

    assert_eq!(args.first().map(String::as_str), Some("-y"));
    let pos = |s: &str| args.iter().position(|a| a == s).unwrap();
    assert_eq!(args[pos("-s") + 1], "1080x1920");
    assert_eq!(args[pos("-r") + 1], "30/1");
    assert!(pos("-r") < pos("-i"));
    assert_eq!(args[pos("-i") + 1], "pipe:0");
    assert_eq!(args[pos("-c:v") + 1], "libx264");
    assert_eq!(args[pos("-preset") + 1], "slow");
    assert_eq!(args[pos("-crf") + 1], "18");
    assert_eq!(args[pos("-b:v") + 1], "12000k");
    assert_eq!(args[pos("-movflags") + 1], "+faststart");
    assert!(args.contains(&"-an".to_owned()));
    assert!(args.contains(&"yuv420p".to_owned()));
    assert_eq!(args.last().map(String::as_str), Some("out/temp_video.mp4"));
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn odd_canvas_is_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let err = sink
        .begin(SinkConfig {
            width: 3,
            height: 4,
            fps: Fps { num: 30, den: 1 },
        })
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[cfg(unix)]
fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt as _;

    let path = dir.join("ffmpeg");
    let script = format!("#!/bin/sh\nif [ \"$1\" = \"-version\" ]; then exit 0; fi\n{body}\n");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn encoder_failure_reports_ffmpeg_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_ffmpeg(
        dir.path(),
        "echo \"Unknown preset 'bogus'\" >&2\nexit 1",
    );
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        preset: "bogus".to_owned(),
        program,
        ..FfmpegSinkOpts::new(dir.path().join("v.mp4"))
    });
    let cfg = sink_cfg();
    sink.begin(cfg.clone()).unwrap();

    let frame = FrameRGBA {
        width: cfg.width,
        height: cfg.height,
        data: vec![0; (cfg.width * cfg.height * 4) as usize],
        premultiplied: true,
    };
    let err = (0..8)
        .find_map(|i| sink.push_frame(FrameIndex(i), &frame).err())
        .expect("writing to an exited encoder must fail");
    let msg = err.to_string();
    assert!(msg.contains("Unknown preset"), "{msg}");
    assert!(sink.child.is_none());
    assert!(sink.stderr_drain.is_none());
}

#[cfg(unix)]
#[test]
fn dropping_a_started_sink_reaps_the_encoder() {
    let dir = tempfile::tempdir().unwrap();
    let done = dir.path().join("done");
    let program = fake_ffmpeg(
        dir.path(),
        &format!("cat > /dev/null\ntouch '{}'", done.display()),
    );
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        program,
        ..FfmpegSinkOpts::new(dir.path().join("v.mp4"))
    });
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        fps: Fps { num: 30, den: 1 },
    })
    .unwrap();
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: false,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    drop(sink);

    // The child has been waited on, so its last command already ran.
    assert!(done.exists());
}
