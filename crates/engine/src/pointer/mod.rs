//! Pointer interaction.
//!
//! Turns raw pointer events over the surface into price-line edits:
//! - Hit-testing the pointer price against draggable lines
//! - Cursor feedback while hovering
//! - The drag state machine and change notifications

mod controller;
mod events;

pub use controller::*;
pub use events::*;
pub use hit_test::*;
