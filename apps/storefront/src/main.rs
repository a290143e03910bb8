//! # Kirana Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        kirana (binary)                                  │
//! │                                                                         │
//! │  stdin ──► console ──► commands ──► Store ──► renderers ──► stdout      │
//! │                                       ▲                                 │
//! │                        catalog task ──┘                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for better testability.

#[tokio::main]
async fn main() {
    if let Err(e) = kirana_storefront::run().await {
        eprintln!("kirana: {}", e);
        std::process::exit(1);
    }
}
