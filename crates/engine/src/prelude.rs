//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use price_overlay_engine::prelude::*;
//! ```

// Errors
pub use crate::error::EngineError;

// Pointer
pub use crate::pointer::{
    DragState, InteractionState, PointerController, PointerEvent, PriceLineChange, drag_threshold,
    hit_test,
};

// Session
pub use crate::session::{ChartSession, Presentation, PriceLineChangeCallback, SessionStats};

// Settings
pub use crate::settings::{InteractionConfig, SessionConfig};

// Sync
pub use crate::sync::{PriceLineSynchronizer, RenderedOverlay, SyncReport};

// Re-exported collaborators
pub use price_overlay_domain::{Candle, LineStyle, PriceLine, PriceLineId, PriceLineKind};
pub use price_overlay_surface::{
    ChartSurface, Cursor, MemorySurface, MemorySurfaceFactory, OverlayHandle, OverlaySpec,
    SurfaceFactory, SurfaceSize,
};
