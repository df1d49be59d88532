//! Core systems for reorderkit.
//!
//! This crate provides the pieces shared by every reorderkit crate:
//!
//! - **Signal/Slot System**: Type-safe notifications ([`Signal`])
//! - **Logging**: `tracing` targets and span helpers ([`logging`])
//!
//! # Signal Example
//!
//! ```
//! use reorderkit_core::Signal;
//!
//! let drag_started = Signal::<usize>::new();
//! let conn_id = drag_started.connect(|origin| {
//!     println!("drag started at row {origin}");
//! });
//!
//! drag_started.emit(2);
//! drag_started.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
