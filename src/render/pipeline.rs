use rayon::prelude::*;

use crate::{
    config::VideoConfig,
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    scene::compose::compose_frame,
};

/// Compose and rasterize a single frame.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    cfg: &VideoConfig,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> ReelResult<FrameRGBA> {
    let scene = compose_frame(cfg, frame);
    backend.render_scene(&scene)
}

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame rendering.
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames rendered and pushed to the sink.
    pub frames_rendered: u64,
}

/// Render `range` into `sink`, strictly in timeline order.
///
/// Parallel mode renders each chunk on a rayon pool with one worker backend per thread, built
/// from [`RenderBackend::worker_render_settings`]; frames still reach the sink in order. Any
/// frame error aborts the render before [`FrameSink::end`] is called.
#[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0, parallel = threading.parallel))]
pub fn render_range(
    cfg: &VideoConfig,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    threading: &RenderThreading,
) -> ReelResult<RenderStats> {
    if range.is_empty() {
        return Err(ReelError::validation("render range must be non-empty"));
    }
    cfg.validate()?;

    let mut stats = RenderStats::default();
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut maybe_pool = None;
    let mut maybe_worker_settings = None;
    if threading.parallel {
        maybe_pool = Some(build_thread_pool(threading.threads)?);
        maybe_worker_settings = Some(backend.worker_render_settings().ok_or_else(|| {
            ReelError::render("parallel render requires backend worker settings support")
        })?);
    }

    sink.begin(SinkConfig {
        width: cfg.canvas.width,
        height: cfg.canvas.height,
        fps: cfg.fps,
    })?;

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?;
        let frames = match (&maybe_pool, &maybe_worker_settings) {
            (Some(pool), Some(settings)) => render_chunk_parallel(cfg, chunk, settings, pool)?,
            _ => render_chunk_sequential(cfg, chunk, backend)?,
        };
        for (offset, frame) in frames.iter().enumerate() {
            sink.push_frame(FrameIndex(chunk_start + offset as u64), frame)?;
        }
        stats.frames_total += chunk.len_frames();
        stats.frames_rendered += frames.len() as u64;
        tracing::debug!(chunk_start, chunk_end, "chunk rendered");
        chunk_start = chunk_end;
    }

    sink.end()?;
    Ok(stats)
}

/// Render a range into memory; mostly useful for tests and previews.
pub fn render_frames(
    cfg: &VideoConfig,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> ReelResult<Vec<FrameRGBA>> {
    let mut sink = crate::encode::sink::InMemorySink::new();
    render_range(cfg, range, backend, &mut sink, threading)?;
    Ok(sink.into_frames())
}

fn render_chunk_sequential(
    cfg: &VideoConfig,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
) -> ReelResult<Vec<FrameRGBA>> {
    let mut out = Vec::with_capacity(range.len_frames() as usize);
    for f in range.start.0..range.end.0 {
        out.push(render_frame(cfg, FrameIndex(f), backend)?);
    }
    Ok(out)
}

fn render_chunk_parallel(
    cfg: &VideoConfig,
    range: FrameRange,
    settings: &RenderSettings,
    pool: &rayon::ThreadPool,
) -> ReelResult<Vec<FrameRGBA>> {
    let indices: Vec<u64> = (range.start.0..range.end.0).collect();
    let rendered = pool.install(|| {
        indices
            .par_iter()
            .map_init(
                || crate::render::cpu::CpuBackend::new(settings.clone()),
                |worker_backend, &f| -> ReelResult<FrameRGBA> {
                    match worker_backend {
                        Ok(b) => render_frame(cfg, FrameIndex(f), b),
                        Err(e) => Err(ReelError::render(format!(
                            "failed to create worker backend: {e}"
                        ))),
                    }
                },
            )
            .collect::<Vec<_>>()
    });

    let mut out = Vec::<FrameRGBA>::with_capacity(rendered.len());
    for item in rendered {
        out.push(item?);
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
