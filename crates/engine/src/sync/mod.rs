//! Price-line synchronization.
//!
//! Reconciles the application's declarative price-line list against the
//! overlays live on a surface:
//! - Create overlays for new active lines
//! - Update changed lines in place
//! - Remove overlays for vanished or inactive lines

mod synchronizer;

pub use synchronizer::*;
