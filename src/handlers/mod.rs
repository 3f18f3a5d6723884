//! HTTP handlers for the channel resource.

pub mod channels;
pub use channels::*;
