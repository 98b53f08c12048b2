pub mod price;
pub mod price_line_id;

pub use price::{distance_within, is_active_price, round_price};
pub use price_line_id::PriceLineId;
