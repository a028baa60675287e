//! Timing constants for the simulator.
//!
//! `std::time::Duration` is not available in `no_std` environments, so the
//! frame budget lives here rather than in the core crate.

use std::time::Duration;

use face_core::config::FRAME_TIME_MS;

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(FRAME_TIME_MS as u64);
