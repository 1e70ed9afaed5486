//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `DriverState`: pagination state of one (place, category) driver
//! - `StopReason`: why a driver stopped
//! - `Accumulator` / `SharedAccumulator`: the run-wide, deduplicated record
//!   collection and its checkpointing

mod accumulator;
mod driver_state;

// Re-export main types
pub use accumulator::{Accumulator, CommitOutcome, SharedAccumulator};
pub use driver_state::{DriverState, StopReason};
