//! Session lifecycle management.
//!
//! A session owns one chart surface and everything registered on it:
//! - Lazy surface creation once candles exist, empty state otherwise
//! - Container resize and forced re-initialization
//! - Pointer dispatch and change notifications
//! - Ordered, idempotent teardown

mod manager;

pub use manager::*;
