//! Domain model for the price-line overlay engine.
//!
//! Holds the plain data the owning application hands to a chart session:
//! - Candles (time-ascending OHLCV bars)
//! - Price lines (take-profit, stop-loss, trailing-stop markers)
//! - Price rounding and threshold helpers
//! - Validation of price-line lists

pub mod entities;
pub mod enums;
pub mod error;
pub mod validation;
pub mod value_objects;

pub use entities::{Candle, PriceLine};
pub use enums::{LineStyle, PriceLineKind};
pub use error::DomainError;
pub use validation::validate_price_lines;
pub use value_objects::PriceLineId;
