use price_overlay_domain::{LineStyle, PriceLine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key of an overlay registered on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayHandle(pub u64);

impl fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// What a surface needs to draw one horizontal price line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySpec {
    pub price: f64,
    pub color: String,
    pub title: String,
    pub line_style: LineStyle,
    pub line_width: u8,
    pub axis_label_visible: bool,
}

impl From<&PriceLine> for OverlaySpec {
    fn from(line: &PriceLine) -> Self {
        Self {
            price: line.price,
            color: line.color.clone(),
            title: line.title.clone(),
            line_style: line.line_style,
            line_width: line.line_width,
            axis_label_visible: line.axis_label_visible,
        }
    }
}
