pub mod candle;
pub mod price_line;

// Re-export for easier access
pub use candle::Candle;
pub use price_line::PriceLine;
