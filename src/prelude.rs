//! Prelude module for the nekaldi crate.
//!
//! Re-exports the derive macros and log macros used across modules.

#[allow(unused_imports)]
pub use derive_more::{Deref, Display, From};
#[allow(unused_imports)]
pub use tracing::{debug, info, warn};
