use super::*;

fn job() -> MuxJob {
    MuxJob {
        video: PathBuf::from("temp_video.mp4"),
        audio: PreparedAudio {
            path: PathBuf::from("temp_audio.f32le"),
            sample_rate: 48_000,
            channels: 2,
            duration_secs: 120.0,
        },
        out: PathBuf::from("atomic_models_animation.mp4"),
    }
}

#[test]
fn args_follow_the_fixed_template() {
    let args: Vec<String> = mux_args(&job())
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let pos = |s: &str| args.iter().position(|a| a == s).unwrap();

    assert_eq!(args[0], "-y");
    assert_eq!(args[pos("-i") + 1], "temp_video.mp4");
    assert_eq!(args[pos("f32le") + 2], "48000");
    assert_eq!(args[pos("-ac") + 1], "2");
    assert_eq!(args[pos("-ac") + 3], "temp_audio.f32le");
    assert_eq!(args[pos("-c:v") + 1], "libx264");
    assert_eq!(args[pos("-c:a") + 1], "aac");
    assert_eq!(args[pos("-strict") + 1], "experimental");
    assert_eq!(args[pos("-movflags") + 1], "+faststart");
    assert_eq!(args[pos("-pix_fmt") + 1], "yuv420p");
    assert!(args.contains(&"-shortest".to_owned()));

    let maps: Vec<&str> = args
        .windows(2)
        .filter(|w| w[0] == "-map")
        .map(|w| w[1].as_str())
        .collect();
    assert_eq!(maps, vec!["0:v:0", "1:a:0"]);
    assert_eq!(args.last().unwrap(), "atomic_models_animation.mp4");
}

#[test]
fn output_is_cut_to_the_shorter_stream() {
    assert_eq!(mux_duration(120.0, 120.0), 120.0);
    assert_eq!(mux_duration(120.0, 90.0), 90.0);
    assert_eq!(mux_duration(60.0, 90.0), 60.0);
}

#[test]
fn zero_channel_audio_is_rejected() {
    let mut j = job();
    j.audio.channels = 0;
    assert!(matches!(run_mux(&j), Err(ReelError::Validation(_))));
}
