//! Background audio preparation.
//!
//! The soundtrack is decoded once to interleaved `f32` PCM, cut to the video length and written
//! to a raw `.f32le` intermediate that the mux step reads back through `ffmpeg`.

/// Decode, trim and write the intermediate track.
pub mod prepare;
