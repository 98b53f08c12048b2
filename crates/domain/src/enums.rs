use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// The kinds of marker a trading dashboard draws on its price chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceLineKind {
    TakeProfit,
    StopLoss,
    TrailingStop,
    Entry,
}

impl PriceLineKind {
    /// Default hex color for the marker.
    pub fn color(&self) -> &'static str {
        match self {
            PriceLineKind::TakeProfit => "#26a69a",
            PriceLineKind::StopLoss => "#ef5350",
            PriceLineKind::TrailingStop => "#ff9800",
            PriceLineKind::Entry => "#2962ff",
        }
    }

    pub fn line_style(&self) -> LineStyle {
        match self {
            PriceLineKind::TakeProfit | PriceLineKind::StopLoss => LineStyle::Dashed,
            PriceLineKind::TrailingStop => LineStyle::Dotted,
            PriceLineKind::Entry => LineStyle::Solid,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PriceLineKind::TakeProfit => "Take Profit",
            PriceLineKind::StopLoss => "Stop Loss",
            PriceLineKind::TrailingStop => "Trailing Stop",
            PriceLineKind::Entry => "Entry",
        }
    }

    /// Threshold markers can be dragged; the entry marker is fixed.
    pub fn is_draggable(&self) -> bool {
        !matches!(self, PriceLineKind::Entry)
    }
}
