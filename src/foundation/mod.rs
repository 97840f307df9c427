/// Colors in straight alpha.
pub mod color;
/// Frame, timing, canvas and vector value types.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Small numeric helpers.
pub mod math;
