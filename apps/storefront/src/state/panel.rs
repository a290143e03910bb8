//! Cart panel visibility.
//!
//! Local view state. It never goes through the store and the cart contents
//! are untouched by toggling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Open/closed flag for the cart panel. Starts closed.
#[derive(Debug, Clone, Default)]
pub struct CartPanel {
    open: Arc<AtomicBool>,
}

impl CartPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Flips the panel and returns whether it is now open.
    pub fn toggle(&self) -> bool {
        let open = !self.open.fetch_xor(true, Ordering::SeqCst);
        debug!(open, "Cart panel toggled");
        open
    }
}
