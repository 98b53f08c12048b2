//! Interactive price-line overlay engine.
//!
//! This crate keeps draggable threshold markers in step with a chart surface:
//! - Keyed reconciliation of price lines against rendered overlays
//! - Pointer hit-testing and the drag state machine
//! - Session lifecycle: creation, resize, re-initialization, teardown
//! - Configuration loading

/// Prelude module for convenient imports.
pub mod prelude;

/// Engine error types.
pub mod error;
/// Pointer interaction.
pub mod pointer;
/// Session lifecycle management.
pub mod session;
/// Session configuration.
pub mod settings;
/// Price-line synchronization.
pub mod sync;
