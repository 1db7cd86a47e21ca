//! Logging facilities for Quickbar.
//!
//! Quickbar uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every subsystem logs under its own target so output can be filtered with
//! standard `tracing` directives, e.g. `RUST_LOG=quickbar::engine=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "quickbar_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "quickbar_core::signal";
    /// Selection store target.
    pub const SELECTION: &str = "quickbar::selection";
    /// Visibility engine target.
    pub const ENGINE: &str = "quickbar::engine";
    /// Action bar widget target.
    pub const BAR: &str = "quickbar::bar";
    /// Renderer seam target.
    pub const RENDERER: &str = "quickbar::renderer";
}
