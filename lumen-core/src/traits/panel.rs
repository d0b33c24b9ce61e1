//! RGB panel peripheral seam
//!
//! Modeled on the vendor panel driver's lifecycle: creation against a
//! timing descriptor and frame-buffer policy, a one-shot init that starts
//! the timing generator, and registration of an interrupt-context vsync
//! callback. The panel handle lives for the process lifetime.

use crate::config::{FramePolicy, PanelTiming};

/// Interrupt-context vsync handler.
///
/// Fired on every vertical sync. Returns `true` when the event woke a
/// higher-priority consumer and a context switch should follow. Must not
/// block, allocate, or take locks.
pub type VsyncCallback = fn() -> bool;

/// Trait for the RGB timing-generator peripheral
pub trait RgbPanel {
    /// Error type for panel operations
    type Error: core::fmt::Debug;

    /// Apply the timing descriptor and allocate frame buffers in external
    /// memory according to `frames`.
    fn configure(&mut self, timing: &PanelTiming, frames: &FramePolicy) -> Result<(), Self::Error>;

    /// Start the hardware timing generator. Called exactly once, after
    /// [`configure`](RgbPanel::configure).
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Install `callback` to run on every vertical-sync event
    fn on_vsync(&mut self, callback: VsyncCallback) -> Result<(), Self::Error>;
}
