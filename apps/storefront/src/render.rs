//! # Renderers
//!
//! Store subscribers that project the state into view models and hand them
//! to a [`RenderTarget`].
//!
//! ## Subscription Order
//! ```text
//! Store::dispatch(action)
//!      │
//!      ├──► listener 1: catalog_view(state) ──► target.render_catalog(..)
//!      │
//!      └──► listener 2: cart_view(state) ─────► target.render_cart(..)
//!
//! PopupNotifier ─────────────────────────────► target.render_popup(..)
//! ```
//!
//! Listeners never read anything but the state they are handed, so two
//! dispatches that leave the same state produce the same views.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use kirana_core::view::{cart_view, catalog_view};
use kirana_core::{CartView, CatalogStatus, CatalogView, CurrencyFormat, Store};

use crate::popup::{PopupPhase, PopupView};
use crate::state::{CartPanel, DisplayTarget};

/// Something that can display the three regions of the storefront.
pub trait RenderTarget: Send {
    fn render_catalog(&mut self, view: &CatalogView);
    fn render_cart(&mut self, view: &CartView);
    fn render_popup(&mut self, view: &PopupView);
}

/// A render target shared between store listeners and the popup timers.
pub type SharedTarget = Arc<Mutex<dyn RenderTarget>>;

/// Builds the target for the configured display.
pub fn build_target(display: DisplayTarget, panel: CartPanel) -> SharedTarget {
    match display {
        DisplayTarget::Console => Arc::new(Mutex::new(ConsoleTarget::stdout(panel))),
        DisplayTarget::Log => Arc::new(Mutex::new(TracingTarget)),
    }
}

/// Registers the catalog renderer, then the cart renderer.
pub fn subscribe_renderers(store: &mut Store, target: SharedTarget, currency: CurrencyFormat) {
    let catalog_target = target.clone();
    let catalog_currency = currency.clone();
    store.subscribe(move |state, _| {
        let view = catalog_view(state, &catalog_currency);
        catalog_target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .render_catalog(&view);
    });

    store.subscribe(move |state, _| {
        let view = cart_view(state, &currency);
        target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .render_cart(&view);
    });
}

// =============================================================================
// Text Formatting
// =============================================================================

/// Text rendering of the product list.
pub fn format_catalog(view: &CatalogView) -> String {
    match &view.status {
        CatalogStatus::Pending => return "Loading products...".to_string(),
        CatalogStatus::Failed { reason } => {
            return format!("Could not load products: {}", reason)
        }
        CatalogStatus::Loaded => {}
    }

    if view.cards.is_empty() {
        return "No products".to_string();
    }

    view.cards
        .iter()
        .map(|card| {
            let button = if card.add_enabled {
                format!("[{}]", card.button_label)
            } else {
                format!("({})", card.button_label)
            };
            format!(
                "#{:<4} {:<24} {:>10}  {:<14} {}",
                card.id.get(),
                card.name,
                card.price_label,
                card.stock_label,
                button
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text rendering of the cart panel.
pub fn format_cart(view: &CartView) -> String {
    let mut lines: Vec<String> = view
        .lines
        .iter()
        .map(|line| {
            format!(
                "#{:<4} {:<24} {:>14} = {:>10}",
                line.id.get(),
                line.name,
                line.unit_label,
                line.line_total
            )
        })
        .collect();
    if lines.is_empty() {
        lines.push("Cart is empty".to_string());
    }
    lines.push(view.total_label.clone());
    lines.join("\n")
}

// =============================================================================
// Tracing Target
// =============================================================================

/// Logs every render. Used with `display.target = "log"`.
#[derive(Debug, Default)]
pub struct TracingTarget;

impl RenderTarget for TracingTarget {
    fn render_catalog(&mut self, view: &CatalogView) {
        info!(cards = view.cards.len(), status = ?view.status, "Catalog rendered");
        for card in &view.cards {
            debug!(
                id = %card.id,
                name = %card.name,
                price = %card.price_label,
                stock = %card.stock_label,
                add_enabled = card.add_enabled,
                "Product card"
            );
        }
    }

    fn render_cart(&mut self, view: &CartView) {
        info!(lines = view.lines.len(), total = %view.total_label, "Cart rendered");
    }

    fn render_popup(&mut self, view: &PopupView) {
        info!(message = %view.message, phase = ?view.phase, "Popup rendered");
    }
}

// =============================================================================
// Console Target
// =============================================================================

/// Writes the storefront to a text stream.
///
/// The catalog is only printed when it changes, so `+`/`-` on a cart line
/// does not repeat the whole product list. The cart is only printed while
/// `panel` is open.
pub struct ConsoleTarget<W: Write + Send> {
    out: W,
    panel: CartPanel,
    last_catalog: Option<CatalogView>,
}

impl ConsoleTarget<std::io::Stdout> {
    pub fn stdout(panel: CartPanel) -> Self {
        ConsoleTarget::new(std::io::stdout(), panel)
    }
}

impl<W: Write + Send> ConsoleTarget<W> {
    pub fn new(out: W, panel: CartPanel) -> Self {
        ConsoleTarget {
            out,
            panel,
            last_catalog: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "Console write failed");
        }
    }
}

impl<W: Write + Send> RenderTarget for ConsoleTarget<W> {
    fn render_catalog(&mut self, view: &CatalogView) {
        if self.last_catalog.as_ref() == Some(view) {
            return;
        }
        let text = format_catalog(view);
        self.write(&text);
        self.last_catalog = Some(view.clone());
    }

    fn render_cart(&mut self, view: &CartView) {
        if self.panel.is_open() {
            let text = format_cart(view);
            self.write(&text);
        }
    }

    fn render_popup(&mut self, view: &PopupView) {
        if view.phase == PopupPhase::Shown {
            let text = format!(">> {}", view.message);
            self.write(&text);
        }
    }
}

// =============================================================================
// Recording Target
// =============================================================================

/// One call to a [`RenderTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRecord {
    Catalog(CatalogView),
    Cart(CartView),
    Popup(PopupView),
}

/// Keeps every render in order. For tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub records: Vec<RenderRecord>,
}

impl RecordingTarget {
    pub fn last_catalog(&self) -> Option<&CatalogView> {
        self.records.iter().rev().find_map(|r| match r {
            RenderRecord::Catalog(v) => Some(v),
            _ => None,
        })
    }

    pub fn last_cart(&self) -> Option<&CartView> {
        self.records.iter().rev().find_map(|r| match r {
            RenderRecord::Cart(v) => Some(v),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl RenderTarget for RecordingTarget {
    fn render_catalog(&mut self, view: &CatalogView) {
        self.records.push(RenderRecord::Catalog(view.clone()));
    }

    fn render_cart(&mut self, view: &CartView) {
        self.records.push(RenderRecord::Cart(view.clone()));
    }

    fn render_popup(&mut self, view: &PopupView) {
        self.records.push(RenderRecord::Popup(view.clone()));
    }
}
