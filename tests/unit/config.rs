use super::*;

#[test]
fn defaults_match_the_reference_animation() {
    let cfg = VideoConfig::default();
    assert_eq!(cfg.style, Style::Classic);
    assert_eq!(cfg.total_frames(), 3600);
    assert_eq!(cfg.canvas.width, 1080);
    assert_eq!(cfg.canvas.height, 1920);
    assert_eq!(cfg.audio_path, PathBuf::from("music.mp3"));
    assert_eq!(cfg.output_path(), PathBuf::from("atomic_models_animation.mp4"));
    assert_eq!(cfg.temp_video_path(), PathBuf::from("./temp_video.mp4"));
    assert_eq!(cfg.bitrate_kbps(), 10_000);
    cfg.validate().unwrap();
}

#[test]
fn enhanced_defaults_differ_only_in_style_derived_values() {
    let cfg = VideoConfig::new(Style::Enhanced);
    assert_eq!(
        cfg.output_path(),
        PathBuf::from("atomic_models_animation_enhanced.mp4")
    );
    assert_eq!(cfg.bitrate_kbps(), 12_000);
    assert_eq!(cfg.total_frames(), 3600);
}

#[test]
fn json_overlay_keeps_unlisted_defaults() {
    let cfg = VideoConfig::from_json_str(
        r##"{
            "style": "enhanced",
            "duration_secs": 8,
            "canvas": { "width": 540, "height": 960 },
            "palette": { "electron": "#FF0000" },
            "out_path": "out/atoms.mp4"
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.style, Style::Enhanced);
    assert_eq!(cfg.total_frames(), 240);
    assert_eq!(cfg.palette.electron, Rgba8::rgb(255, 0, 0));
    assert_eq!(cfg.palette.nucleus, Palette::default().nucleus);
    assert_eq!(cfg.work_dir(), PathBuf::from("out"));
    assert_eq!(cfg.temp_audio_path(), PathBuf::from("out/temp_audio.f32le"));
    assert_eq!(cfg.seed, LAYOUT_SEED);
}

#[test]
fn json_overlay_rejects_unknown_keys() {
    assert!(VideoConfig::from_json_str(r#"{ "durration_secs": 3 }"#).is_err());
}

#[test]
fn validation_catches_bad_values() {
    let odd = VideoConfig {
        canvas: Canvas {
            width: 11,
            height: 10,
        },
        ..VideoConfig::default()
    };
    assert!(odd.validate().is_err());

    let zero_fps = VideoConfig {
        fps: Fps { num: 0, den: 1 },
        ..VideoConfig::default()
    };
    assert!(zero_fps.validate().is_err());

    let zero_duration = VideoConfig {
        duration_secs: 0,
        ..VideoConfig::default()
    };
    assert!(zero_duration.validate().is_err());

    let huge = VideoConfig {
        canvas: Canvas {
            width: 70_000,
            height: 10,
        },
        ..VideoConfig::default()
    };
    assert!(huge.validate().is_err());
}

#[test]
fn completion_message_names_the_output() {
    let msg = Style::Enhanced.completion_message(Path::new("x.mp4"));
    assert_eq!(
        msg,
        "Enhanced atomic models animation complete! Saved to x.mp4"
    );
}
