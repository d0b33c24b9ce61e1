//! Blocking delays
//!
//! The settle holds in the bring-up sequence are hard lower bounds from
//! the component datasheets, not tunables. They are plain blocking sleeps
//! with no cancellation path.

/// Millisecond-resolution blocking delay
pub trait DelayMs {
    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}
