//! Frame sinks and the `ffmpeg` encode/mux steps.

/// The [`Encoder`](encoder::Encoder) capability and its `ffmpeg` implementation.
pub mod encoder;
/// Streaming frame sink backed by the system `ffmpeg`.
pub mod ffmpeg;
/// Combining the silent video with the prepared audio.
pub mod mux;
/// Frame sink contract and an in-memory implementation.
pub mod sink;
