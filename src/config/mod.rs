//! Application configuration.
//!
//! - `window`: display configuration for the primary window
//! - `offline`: offline asset service settings (upstream, bind, cache root)

pub mod offline;
pub mod window;

pub use offline::OfflineConfig;
pub use window::WindowConfig;
