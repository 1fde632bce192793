//! TUI components for rendering different views.

mod counter;

pub use counter::render_counter;
