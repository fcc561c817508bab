//! Frame loop bookkeeping.

/// Elapsed and delta time for each tick.
pub mod frame_clock;
