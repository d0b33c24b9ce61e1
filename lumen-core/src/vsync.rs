//! Vsync-to-renderer frame signal
//!
//! The panel's vsync callback runs in interrupt context; the renderer
//! runs in thread context. This type is the only thing shared between
//! them: two atomics, no locks, so the interrupt side can never block.

use core::sync::atomic::{AtomicBool, Ordering};

/// Shared flag pair between the vsync interrupt and the renderer.
///
/// Intended to live in a `static`; every method takes `&self`.
pub struct FrameSignal {
    /// A vsync has occurred since the renderer last looked
    ready: AtomicBool,
    /// The renderer is parked waiting for the next vsync
    armed: AtomicBool,
}

impl FrameSignal {
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            armed: AtomicBool::new(false),
        }
    }

    /// Record a vsync event. Interrupt context.
    ///
    /// Returns `true` when the renderer was armed, meaning a
    /// higher-priority task was woken and the interrupt handler should
    /// request a context switch on exit.
    pub fn notify(&self) -> bool {
        self.ready.store(true, Ordering::Release);
        self.armed.swap(false, Ordering::AcqRel)
    }

    /// Park for the next vsync. Thread context, called before waiting.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::Release);
    }

    /// Consume a pending vsync, if any. Thread context.
    pub fn take(&self) -> bool {
        self.ready.swap(false, Ordering::AcqRel)
    }
}

impl Default for FrameSignal {
    fn default() -> Self {
        Self::new()
    }
}
