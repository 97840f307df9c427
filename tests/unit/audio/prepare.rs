use super::*;

fn silence(secs: u32, sample_rate: u32) -> AudioPcm {
    AudioPcm {
        channels: 2,
        sample_rate,
        interleaved_f32: vec![0.25; (secs * sample_rate * 2) as usize],
    }
}

#[test]
fn long_track_is_cut_to_target() {
    let pcm = trim_pcm(silence(180, 1_000), 120.0);
    assert_eq!(pcm.duration_secs(), 120.0);
    assert_eq!(pcm.interleaved_f32.len(), 120 * 1_000 * 2);
}

#[test]
fn short_track_is_left_alone() {
    let pcm = trim_pcm(silence(90, 1_000), 120.0);
    assert_eq!(pcm.duration_secs(), 90.0);
}

#[test]
fn missing_source_fails_before_decoding() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("temp_audio.f32le");
    let err = prepare_audio(&dir.path().join("music.mp3"), 120.0, &out, |_, _| {
        panic!("decode must not run for a missing file")
    })
    .unwrap_err();
    assert!(matches!(err, ReelError::Audio(_)));
    assert!(!out.exists());
}

#[test]
fn prepared_file_holds_exactly_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("music.mp3");
    std::fs::write(&src, b"stand-in").unwrap();
    let out = dir.path().join("work").join("temp_audio.f32le");

    let prepared = prepare_audio(&src, 120.0, &out, |_, max_secs| {
        assert_eq!(max_secs, 120.0);
        Ok(silence(180, 1_000))
    })
    .unwrap();
    assert_eq!(prepared.duration_secs, 120.0);
    assert_eq!((prepared.sample_rate, prepared.channels), (1_000, 2));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(bytes.len(), 120 * 1_000 * 2 * 4);
    assert_eq!(&bytes[..4], &0.25f32.to_le_bytes());
}

#[test]
fn decode_errors_propagate() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("music.mp3");
    std::fs::write(&src, b"not audio").unwrap();
    let err = prepare_audio(&src, 1.0, &dir.path().join("a.f32le"), |_, _| {
        Err(ReelError::audio("corrupt"))
    })
    .unwrap_err();
    assert!(matches!(err, ReelError::Audio(_)));
}

#[test]
fn decode_stops_at_the_requested_length() {
    let args: Vec<String> = decode_args(Path::new("music.mp3"), 48_000, Some(120.0))
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let pos = |s: &str| args.iter().position(|a| a == s).unwrap();
    assert_eq!(args[pos("-i") + 1], "music.mp3");
    assert!(pos("-t") > pos("-i"));
    assert_eq!(args[pos("-t") + 1].parse::<f64>().unwrap(), 120.0);
    assert_eq!(args[pos("-ar") + 1], "48000");
    assert_eq!(args.last().map(String::as_str), Some("pipe:1"));

    let unbounded = decode_args(Path::new("music.mp3"), 48_000, None);
    assert!(!unbounded.iter().any(|a| a == "-t"));
}
