use crate::enums::{LineStyle, PriceLineKind};
use crate::value_objects::{PriceLineId, is_active_price};
use serde::{Deserialize, Serialize};

fn default_line_width() -> u8 {
    1
}

fn default_true() -> bool {
    true
}

/// A horizontal threshold marker supplied by the owning application.
///
/// A price of zero or below hides the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLine {
    pub id: PriceLineId,
    pub price: f64,
    pub color: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default)]
    pub draggable: bool,
    #[serde(default = "default_line_width")]
    pub line_width: u8,
    #[serde(default = "default_true")]
    pub axis_label_visible: bool,
}

impl PriceLine {
    pub fn new(id: impl Into<PriceLineId>, price: f64) -> Self {
        Self {
            id: id.into(),
            price,
            color: "#787b86".to_string(),
            title: String::new(),
            line_style: LineStyle::Solid,
            draggable: false,
            line_width: default_line_width(),
            axis_label_visible: true,
        }
    }

    /// Builds one of the dashboard's standard markers.
    pub fn preset(kind: PriceLineKind, id: impl Into<PriceLineId>, price: f64) -> Self {
        Self::new(id, price)
            .with_color(kind.color())
            .with_title(kind.title())
            .with_style(kind.line_style())
            .with_draggable(kind.is_draggable())
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, width: u8) -> Self {
        self.line_width = width;
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Whether the line should be rendered at all.
    pub fn is_active(&self) -> bool {
        is_active_price(self.price)
    }

    /// Whether a pointer gesture may grab this line.
    pub fn is_grabbable(&self) -> bool {
        self.draggable && self.is_active()
    }
}
