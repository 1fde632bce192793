//! Core widget logic shared by the CLI and the TUI.

pub mod client;
mod error;
pub mod state;
pub mod surface;
pub mod widget;

pub use client::{CounterClient, CounterResponse};
pub use error::{BODY_SNIPPET_LEN, Error, FailureKind, FetchError, Result, error_chain};
pub use state::{Count, DisplayMode, DisplayState, Event, Region, RequestAction};
pub use surface::{DisplaySurface, MemorySurface};
pub use widget::{CounterWidget, Ticket};
