use super::*;

use crate::config::Style;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Fps};
use crate::render::cpu::CpuBackend;
use crate::scene::model::Scene;

fn tiny_config() -> VideoConfig {
    VideoConfig {
        duration_secs: 1,
        fps: Fps { num: 6, den: 1 },
        canvas: Canvas {
            width: 24,
            height: 40,
        },
        ..VideoConfig::new(Style::Enhanced)
    }
}

fn cpu(cfg: &VideoConfig) -> CpuBackend {
    CpuBackend::new(RenderSettings::without_text(cfg.canvas)).unwrap()
}

#[test]
fn sequential_render_pushes_every_frame_in_order() {
    let cfg = tiny_config();
    let mut backend = cpu(&cfg);
    let mut sink = InMemorySink::new();
    let stats = render_range(
        &cfg,
        cfg.frame_range(),
        &mut backend,
        &mut sink,
        &RenderThreading {
            chunk_size: 4,
            ..RenderThreading::default()
        },
    )
    .unwrap();

    assert_eq!(stats.frames_total, 6);
    assert_eq!(stats.frames_rendered, 6);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4, 5]);
    let sink_cfg = sink.config().unwrap();
    assert_eq!((sink_cfg.width, sink_cfg.height), (24, 40));
    assert!(sink.ended());
}

#[test]
fn parallel_render_matches_sequential() {
    let cfg = tiny_config();
    let range = cfg.frame_range();

    let mut backend = cpu(&cfg);
    let seq = render_frames(&cfg, range, &mut backend, &RenderThreading::default()).unwrap();
    let par = render_frames(
        &cfg,
        range,
        &mut backend,
        &RenderThreading {
            parallel: true,
            chunk_size: 0,
            threads: Some(2),
        },
    )
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn invalid_threading_and_ranges_are_rejected() {
    let cfg = tiny_config();
    let mut backend = cpu(&cfg);
    let mut sink = InMemorySink::new();

    let zero_threads = RenderThreading {
        parallel: true,
        threads: Some(0),
        ..RenderThreading::default()
    };
    let err = render_range(&cfg, cfg.frame_range(), &mut backend, &mut sink, &zero_threads)
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));

    let empty = FrameRange {
        start: FrameIndex(3),
        end: FrameIndex(3),
    };
    assert!(
        render_range(&cfg, empty, &mut backend, &mut sink, &RenderThreading::default()).is_err()
    );
    assert!(sink.config().is_none());
}

struct FailsAt(u64, u64);

impl RenderBackend for FailsAt {
    fn render_scene(&mut self, _scene: &Scene) -> ReelResult<FrameRGBA> {
        let n = self.1;
        self.1 += 1;
        if n == self.0 {
            return Err(ReelError::render("boom"));
        }
        Ok(FrameRGBA {
            width: 24,
            height: 40,
            data: vec![0; 24 * 40 * 4],
            premultiplied: true,
        })
    }
}

#[test]
fn frame_error_stops_before_sink_end() {
    let cfg = tiny_config();
    let mut backend = FailsAt(2, 0);
    let mut sink = InMemorySink::new();
    let err = render_range(
        &cfg,
        cfg.frame_range(),
        &mut backend,
        &mut sink,
        &RenderThreading {
            chunk_size: 1,
            ..RenderThreading::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));
    assert_eq!(sink.frames().len(), 2);
    assert!(!sink.ended());
}

#[test]
fn parallel_requires_worker_settings() {
    let cfg = tiny_config();
    let mut backend = FailsAt(u64::MAX, 0);
    let err = render_frames(
        &cfg,
        cfg.frame_range(),
        &mut backend,
        &RenderThreading {
            parallel: true,
            ..RenderThreading::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));
}

#[test]
fn chunk_size_zero_means_one() {
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(64), 64);
}
