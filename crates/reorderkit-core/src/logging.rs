//! Logging and tracing facilities for reorderkit.
//!
//! reorderkit uses the `tracing` crate for instrumentation and never installs
//! a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("reorderkit=debug")
//!     .init();
//! ```
//!
//! Use the constants in [`targets`] to filter a single subsystem, e.g.
//! `RUST_LOG=reorderkit::machine=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Reorder state machine transitions.
    pub const MACHINE: &str = "reorderkit::machine";
    /// Floating proxy lifecycle.
    pub const PROXY: &str = "reorderkit::proxy";
    /// List model mutation.
    pub const MODEL: &str = "reorderkit::model";
    /// Long-press and pointer translation.
    pub const GESTURE: &str = "reorderkit::gesture";
    /// Signal emission.
    pub const SIGNAL: &str = "reorderkit::signal";
    /// Configuration loading.
    pub const CONFIG: &str = "reorderkit::config";
}

/// Create the span covering one drag session that started at `origin`.
///
/// The span is stored with the session and entered for each gesture the
/// session handles, so log lines from a drag share its fields.
pub fn drag_session_span(origin: usize) -> tracing::Span {
    tracing::debug_span!(target: "reorderkit::machine", "drag_session", origin)
}

/// Install an env-filter `tracing` subscriber that writes to the test harness.
///
/// Honours `RUST_LOG`, defaulting to `reorderkit=debug`. Safe to call from
/// every test; only the first call installs the subscriber.
#[cfg(feature = "test-support")]
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reorderkit=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
