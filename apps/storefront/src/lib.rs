//! # Kirana Storefront
//!
//! Host application for the Kirana shopping cart: owns the store, wires the
//! renderers, loads the catalog and exposes the UI entry points.
//!
//! ## Module Organization
//! ```text
//! kirana_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── storefront.rs   ◄─── Storefront context passed to every command
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Shared store handle
//! │   ├── panel.rs    ◄─── Cart panel open/closed
//! │   └── config.rs   ◄─── storefront.toml + KIRANA_* overrides
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── add / + / - / remove / toggle
//! │   └── catalog.rs  ◄─── catalog load and replacement
//! ├── render.rs       ◄─── RenderTarget + store subscribers
//! ├── popup.rs        ◄─── "Product added to cart!" timers
//! ├── console.rs      ◄─── stdin front end
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod popup;
pub mod render;
pub mod state;
pub mod storefront;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ConfigError, ErrorCode};
pub use storefront::Storefront;

use state::{CartPanel, StorefrontConfig};

/// Runs the storefront on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO (kirana crates DEBUG), override with RUST_LOG       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • storefront.toml, then KIRANA_* environment variables              │
/// │     • Falls back to defaults on any error                               │
/// │                                                                         │
/// │  3. Build the Storefront ─────────────────────────────────────────────► │
/// │     • Store with the configured stock policy                            │
/// │     • Console or log display, catalog renderer then cart renderer       │
/// │                                                                         │
/// │  4. Load the Catalog (background) ────────────────────────────────────► │
/// │     • SET_PRODUCTS on success, LOAD_FAILED otherwise                    │
/// │                                                                         │
/// │  5. Read Commands ────────────────────────────────────────────────────► │
/// │     • Until `quit` or end of input                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), ApiError> {
    init_tracing();

    info!("Starting Kirana storefront");

    let config = StorefrontConfig::load_or_default(None);
    info!(
        catalog = %config.catalog.source,
        stock_policy = %config.cart.stock_policy,
        display = %config.display.target,
        "Configuration loaded"
    );

    let panel = CartPanel::new();
    let target = render::build_target(config.display.target, panel.clone());
    let shop = Storefront::new(config, target, panel);

    let loader = shop.clone();
    tokio::spawn(async move {
        if let Err(e) = commands::load_catalog(&loader).await {
            warn!(error = %e, "Initial catalog load failed");
        }
    });

    let mut stdout = std::io::stdout();
    console::run_console(&shop, tokio::io::stdin(), &mut stdout).await?;

    info!("Storefront stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kirana_core=trace` - Show reducer traces
/// - Default: INFO, DEBUG for kirana crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kirana=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
