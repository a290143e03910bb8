//! # Popup Notifier
//!
//! Transient confirmation message shown after a product is added.
//!
//! ## Phases
//! ```text
//!   show("Product added to cart!")
//!        │
//!        ▼
//!   ┌─────────┐  show_ms (1500)  ┌─────────┐  hide_ms (500)  ┌─────────┐
//!   │  Shown  │ ───────────────► │ Hiding  │ ──────────────► │ Hidden  │
//!   └─────────┘                  └─────────┘                 └─────────┘
//! ```
//!
//! ## Overlapping Popups
//! Each call to [`PopupNotifier::show`] starts its own timer chain and
//! nothing cancels earlier chains. A second popup shown inside the first
//! one's window is moved to `Hiding`/`Hidden` by the first chain, then again
//! by its own. Every transition is logged with the popup id that caused it.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::render::SharedTarget;
use crate::state::PopupSettings;

/// Message shown after a successful add.
pub const ADDED_TO_CART: &str = "Product added to cart!";

/// Visibility of the popup element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PopupPhase {
    #[default]
    Hidden,
    Shown,
    Hiding,
}

/// What the popup element displays.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PopupView {
    pub message: String,
    pub phase: PopupPhase,
}

impl PopupView {
    pub fn is_visible(&self) -> bool {
        self.phase != PopupPhase::Hidden
    }
}

/// Drives the popup through its phases.
#[derive(Clone)]
pub struct PopupNotifier {
    view: Arc<Mutex<PopupView>>,
    show_for: Duration,
    hide_for: Duration,
    target: Option<SharedTarget>,
}

impl std::fmt::Debug for PopupNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupNotifier")
            .field("view", &self.view())
            .field("show_for", &self.show_for)
            .field("hide_for", &self.hide_for)
            .finish()
    }
}

impl PopupNotifier {
    pub fn new(settings: PopupSettings, target: Option<SharedTarget>) -> Self {
        PopupNotifier {
            view: Arc::new(Mutex::new(PopupView::default())),
            show_for: settings.show_for(),
            hide_for: settings.hide_for(),
            target,
        }
    }

    /// Current popup state.
    pub fn view(&self) -> PopupView {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Shows `message` and schedules the hide.
    ///
    /// Returns the timer task, or `None` outside a Tokio runtime. In that
    /// case the popup stays shown until the next call.
    pub fn show(&self, message: impl Into<String>) -> Option<JoinHandle<()>> {
        let id = Uuid::new_v4();
        self.transition(id, Some(message.into()), PopupPhase::Shown);

        let Ok(handle) = Handle::try_current() else {
            debug!(popup_id = %id, "No runtime, popup timers not scheduled");
            return None;
        };

        let notifier = self.clone();
        Some(handle.spawn(async move {
            tokio::time::sleep(notifier.show_for).await;
            notifier.transition(id, None, PopupPhase::Hiding);
            tokio::time::sleep(notifier.hide_for).await;
            notifier.transition(id, None, PopupPhase::Hidden);
        }))
    }

    fn transition(&self, id: Uuid, message: Option<String>, phase: PopupPhase) {
        let view = {
            let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(message) = message {
                view.message = message;
            }
            view.phase = phase;
            view.clone()
        };

        debug!(popup_id = %id, ?phase, "Popup transition");

        if let Some(target) = &self.target {
            target
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .render_popup(&view);
        }
    }
}
