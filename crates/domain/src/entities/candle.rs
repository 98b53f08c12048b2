use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar. Sequences are supplied time-ascending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time in unix seconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Open time as a UTC date, `None` when the timestamp is out of range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Lowest low and highest high across `candles`, ignoring non-finite values.
pub fn price_bounds(candles: &[Candle]) -> Option<(f64, f64)> {
    candles
        .iter()
        .filter(|c| c.low.is_finite() && c.high.is_finite())
        .fold(None, |acc, c| match acc {
            None => Some((c.low, c.high)),
            Some((lo, hi)) => Some((lo.min(c.low), hi.max(c.high))),
        })
}
