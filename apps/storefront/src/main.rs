//! # Storefront Entry Point
//!
//! ```text
//! ┌──────────────────────┐   JSON command per line   ┌──────────────────────┐
//! │      Page layer      │ ────────── stdin ───────► │  storefront (Rust)   │
//! │  (web front-end)     │ ◄───────── stdout ─────── │  commands + state    │
//! └──────────────────────┘   JSON response per line  └──────────┬───────────┘
//!                                                               │ stderr
//!                                                               ▼
//!                                                             logs
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match brew_storefront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storefront stopped");
            ExitCode::FAILURE
        }
    }
}
