//! Rendering surface adapter.
//!
//! The charting engine that draws candles is an external collaborator. This
//! crate defines the narrow capability set the overlay engine needs from it:
//! - Surface lifecycle (create, resize, destroy)
//! - Coordinate to price mapping
//! - Candle data and view fitting
//! - Horizontal line overlays
//! - Pan/zoom suspension and cursor feedback
//!
//! [`MemorySurface`] is a headless engine implementing the same contract.

/// Surface error types.
pub mod error;
/// Headless in-memory surface.
pub mod memory;
/// Overlay handles and specs.
pub mod overlay;
/// Capability traits.
pub mod surface;

pub use error::SurfaceError;
pub use memory::{MemorySurface, MemorySurfaceFactory, SurfaceCounters};
pub use overlay::{OverlayHandle, OverlaySpec};
pub use surface::{ChartSurface, Cursor, SurfaceFactory, SurfaceSize};
