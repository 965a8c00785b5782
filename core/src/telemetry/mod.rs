//! telemetry/mod.rs
//! Per-call counters, stage timers and the immutable encode report.
//!
//! Notes:
//! - Counters are filled while one encode runs, then frozen into an
//!   `EncodeReport` that serializes with serde.
//! - Nothing here ever sees payload bytes or keys, only sizes and timings.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
