//! # Bean & Brew Storefront
//!
//! The storefront engine: catalog, cart, checkout and receipt behind a
//! line-based JSON command channel. The page layer (rendering, routing,
//! sign-in) lives outside this process and talks to it over stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! brew_storefront/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── ipc.rs          ◄─── Command parsing and dispatch
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Products and reviews
//! │   ├── cart.rs     ◄─── Cart state + change subscription
//! │   ├── session.rs  ◄─── Session storage (lastReceipt)
//! │   ├── notifier.rs ◄─── Email sender
//! │   └── config.rs   ◄─── Configuration loading
//! ├── commands/
//! │   ├── catalog.rs  ◄─── Product list, product page, reviews
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── checkout.rs ◄─── Order placement
//! │   ├── receipt.rs  ◄─── Receipt view
//! │   ├── contact.rs  ◄─── Contact form and newsletter
//! │   └── config.rs   ◄─── Public configuration
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management: Multiple State Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront State                                     │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ CatalogState │ │  CartState   │ │ SessionState │ │NotifierState │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  `Storefront` only holds them. Commands take the individual states,    │
//! │  never the whole `Storefront`.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod ipc;
pub mod state;

use brew_session::Session;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use error::StartupError;
use ipc::Event;
use state::{
    CartSnapshot, CartState, CatalogState, ConfigState, NotifierState, SessionState, StorefrontConfig,
};

/// Every piece of state for one storefront session.
#[derive(Debug)]
pub struct Storefront {
    pub config: ConfigState,
    pub catalog: CatalogState,
    pub cart: CartState,
    pub session: SessionState,
    pub notifier: NotifierState,
}

impl Storefront {
    /// Fresh cart and session around the given catalog and sender.
    pub fn new(config: StorefrontConfig, catalog: CatalogState, notifier: NotifierState) -> Self {
        Storefront {
            config: ConfigState::new(config),
            catalog,
            cart: CartState::new(),
            session: SessionState::new(Session::in_memory()),
            notifier,
        }
    }

    /// Loads the catalog and builds the email sender named by `config`.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StartupError> {
        let catalog = CatalogState::load(config.catalog.path.as_deref())?;
        let notifier = NotifierState::from_config(&config)?;
        Ok(Self::new(config, catalog, notifier))
    }
}

/// Runs the storefront until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: info,brew=debug; RUST_LOG overrides                      │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults ► storefront.toml ► environment                          │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CatalogState: catalog file or the bundled catalog                 │
/// │     • NotifierState: Resend or log sender                               │
/// │     • CartState, SessionState: empty                                    │
/// │                                                                         │
/// │  4. Command Loop ─────────────────────────────────────────────────────► │
/// │     • stdin line ► ipc::handle_bytes ► stdout line                      │
/// │     • cart changes ► {"event":"cart_updated"} lines                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), StartupError> {
    init_tracing();

    info!("Starting Bean & Brew storefront");

    let config = StorefrontConfig::load(None)?;
    let app = Storefront::from_config(config)?;
    info!(session_id = %app.session.inner().id(), "State initialized");

    let served = serve(&app, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await;

    if let Err(e) = app.session.inner().end() {
        warn!(error = %e, "Failed to clear session storage");
    }

    served?;
    Ok(())
}

/// Answers commands from `input` on `output` until `input` ends.
///
/// ```text
///   input ──► read_until('\n') ──► ipc::handle_bytes ──┐
///                                                      ├──► mpsc ──► writer ──► output
///   cart watch ──► cart_updated events ─────────────────┘
/// ```
///
/// A bad line is answered with an error and the loop goes on; only end of
/// input or a read failure stops it. Queued lines are written out before
/// this returns either way. Hands `output` back when everything is flushed.
pub async fn serve<R, W>(app: &Storefront, mut input: R, output: W) -> std::io::Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    // Responses and events share one writer so lines never interleave.
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(async move {
        let mut output = output;
        while let Some(line) = out_rx.recv().await {
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        Ok::<W, std::io::Error>(output)
    });

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let events = tokio::spawn(publish_cart_updates(
        app.cart.subscribe(),
        out_tx.clone(),
        shutdown_rx,
    ));

    let mut buf = Vec::new();
    let read_result = loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf).await {
            Ok(0) => break Ok(()),
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Failed to read command channel");
                break Err(e);
            }
        }

        let Some(response) = ipc::handle_bytes(app, &buf).await else {
            continue;
        };
        if out_tx.send(response).is_err() {
            warn!("Output channel closed");
            break Ok(());
        }
    };

    info!("Command channel closed, shutting down");
    let _ = shutdown_tx.send(());
    if let Err(e) = events.await {
        error!(error = %e, "Cart event task failed");
    }
    drop(out_tx);

    let output = match writer.await {
        Ok(result) => result?,
        Err(e) => return Err(std::io::Error::other(e.to_string())),
    };
    read_result.map(|()| output)
}

/// Pushes a `cart_updated` line for every cart change until shut down.
async fn publish_cart_updates(
    mut updates: watch::Receiver<CartSnapshot>,
    out: mpsc::UnboundedSender<String>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() || !send_cart_update(&mut updates, &out) {
                    break;
                }
            }
            _ = &mut shutdown => {
                // The last command may have changed the cart.
                if updates.has_changed().unwrap_or(false) {
                    send_cart_update(&mut updates, &out);
                }
                break;
            }
        }
    }
}

fn send_cart_update(updates: &mut watch::Receiver<CartSnapshot>, out: &mpsc::UnboundedSender<String>) -> bool {
    let cart = updates.borrow_and_update().clone();
    debug!(total_items = cart.totals.total_items, "Publishing cart update");
    out.send(ipc::encode(&Event::CartUpdated { cart })).is_ok()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=brew=trace` - Show trace for brew crates only
/// - Default: `info,brew=debug`
///
/// Logs go to stderr; stdout carries command responses.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,brew=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_notify::{MemoryNotifier, StoreIdentity};
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;

    fn storefront() -> Storefront {
        let notifier = NotifierState::new(
            Arc::new(MemoryNotifier::new()),
            StoreIdentity::default(),
            Duration::from_secs(1),
        );
        Storefront::new(StorefrontConfig::default(), CatalogState::bundled().unwrap(), notifier)
    }

    async fn serve_bytes(app: &Storefront, input: &[u8]) -> Vec<Value> {
        let output = serve(app, input, Vec::new()).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn responses(lines: &[Value]) -> Vec<&Value> {
        lines.iter().filter(|line| line.get("event").is_none()).collect()
    }

    fn cart_events(lines: &[Value]) -> Vec<&Value> {
        lines.iter().filter(|line| line["event"] == "cart_updated").collect()
    }

    #[tokio::test]
    async fn test_non_utf8_line_does_not_stop_the_loop() {
        let app = storefront();
        let input = b"{\"cmd\":\"add_to_cart\",\"productId\":1}\n\xff\xfe\n{\"cmd\":\"get_cart\"}\n";

        let lines = serve_bytes(&app, input).await;
        let responses = responses(&lines);

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["ok"]["totals"]["totalItems"], 1);
        assert_eq!(responses[1]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(responses[2]["ok"]["totals"]["totalItems"], 1);
    }

    #[tokio::test]
    async fn test_blank_and_unterminated_lines() {
        let app = storefront();
        let input = b"\n   \n{\"cmd\":\"cart_badge\"}";

        let lines = serve_bytes(&app, input).await;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["ok"]["totalItems"], 0);
    }

    #[tokio::test]
    async fn test_last_cart_change_is_published() {
        let app = storefront();
        let input = b"{\"cmd\":\"add_to_cart\",\"productId\":2,\"quantity\":3}\n";

        let lines = serve_bytes(&app, input).await;

        assert_eq!(responses(&lines).len(), 1);
        let events = cart_events(&lines);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["cart"]["totals"]["totalItems"], 3);
    }

    #[tokio::test]
    async fn test_reads_without_changes_publish_nothing() {
        let app = storefront();
        let input = b"{\"cmd\":\"get_cart\"}\n{\"cmd\":\"list_categories\"}\n";

        let lines = serve_bytes(&app, input).await;

        assert_eq!(lines.len(), 2);
        assert!(cart_events(&lines).is_empty());
    }
}
