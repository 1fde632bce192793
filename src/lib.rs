//! Visitor counter widget.
//!
//! Fetches the current visitor count from a counting endpoint and renders it
//! into two display regions of a host surface:
//! - CLI one-shot output
//! - Terminal user interface (TUI)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  ┌─────────────┐
//! │     CLI     │  │     TUI     │
//! └──────┬──────┘  └──────┬──────┘
//!        │                │
//!        └───────┬────────┘
//!                │
//!         ┌──────┴──────┐
//!         │    Core     │  CounterWidget → DisplaySurface
//!         └──────┬──────┘
//!                │ GET
//!         ┌──────┴──────┐
//!         │  Endpoint   │
//!         └─────────────┘
//! ```

pub mod build_info;
pub mod cli;
pub mod config;
pub mod core;
pub mod tui;

pub use config::Config;
pub use crate::core::{CounterWidget, DisplayState, FetchError, MemorySurface};
