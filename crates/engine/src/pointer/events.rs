//! Pointer events and drag types.

use price_overlay_domain::PriceLineId;
use serde::{Deserialize, Serialize};

/// A pointer event in surface coordinates.
///
/// Only the vertical offset matters: price lines span the whole time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Primary button pressed over the surface.
    Down {
        /// Vertical offset in pixels.
        y: f64,
    },
    /// Pointer moved over the surface.
    Move {
        /// Vertical offset in pixels.
        y: f64,
        /// Whether a button is held.
        button_pressed: bool,
    },
    /// Button released anywhere.
    Up,
}

/// The single in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Line being dragged.
    pub line_id: PriceLineId,
    /// Price of the line when the drag started.
    pub start_price: f64,
}

/// Interaction state of the controller.
///
/// Hovering carries no state of its own; it only shows up as cursor feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    /// No drag in progress.
    Idle,
    /// A line is being dragged.
    Dragging,
}

/// A proposed new price for a line, emitted during a drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLineChange {
    /// Line being edited.
    pub line_id: PriceLineId,
    /// Proposed price, already rounded.
    pub price: f64,
}
