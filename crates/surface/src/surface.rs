//! Capability traits implemented by a charting engine.

use crate::error::SurfaceError;
use crate::overlay::{OverlayHandle, OverlaySpec};
use price_overlay_domain::Candle;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of a surface or its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Creates a new size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Replaces the height when a fixed one is configured.
    #[must_use]
    pub fn with_fixed_height(self, height: Option<u32>) -> Self {
        Self {
            width: self.width,
            height: height.unwrap_or(self.height),
        }
    }
}

/// Pointer cursor presented over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    /// Engine default (crosshair or arrow).
    #[default]
    Default,
    /// A line is under the pointer and can be dragged.
    ResizeVertical,
    /// A line is being dragged.
    Grabbing,
}

/// One live chart instance bound to a container.
///
/// All calls happen on the UI event loop; implementations need not be `Send`.
pub trait ChartSurface {
    /// Resizes the drawing area, keeping overlays and the current view.
    fn resize(&mut self, width: u32, height: u32);

    /// Current drawing area size.
    fn size(&self) -> SurfaceSize;

    /// Maps a vertical pixel offset to a price under the current view.
    ///
    /// Returns `None` outside the plotted range or before any data exists.
    fn coordinate_to_price(&self, y: f64) -> Option<f64>;

    /// Replaces the candle series. Never called with an empty slice.
    fn set_candles(&mut self, candles: &[Candle]);

    /// Fits the visible time range to the loaded data.
    fn fit_content(&mut self);

    /// Registers a horizontal line overlay spanning the visible time range.
    fn add_line_overlay(&mut self, spec: &OverlaySpec) -> OverlayHandle;

    /// Updates an overlay in place.
    ///
    /// # Errors
    /// Engines without an update primitive return
    /// [`SurfaceError::UpdateUnsupported`]; callers fall back to
    /// remove-then-create.
    fn update_line_overlay(
        &mut self,
        handle: OverlayHandle,
        spec: &OverlaySpec,
    ) -> Result<(), SurfaceError> {
        let _ = (handle, spec);
        Err(SurfaceError::UpdateUnsupported)
    }

    /// Removes an overlay. Unknown handles are ignored and yield `false`.
    fn remove_line_overlay(&mut self, handle: OverlayHandle) -> bool;

    /// Enables or suspends the engine's native pan/zoom gestures.
    fn set_pan_zoom_enabled(&mut self, enabled: bool);

    /// Sets the cursor shown over the surface.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Frees the surface and every overlay registered on it.
    fn destroy(&mut self);
}

/// Creates surfaces for a chart container.
pub trait SurfaceFactory {
    /// Surface type produced by this factory.
    type Surface: ChartSurface;

    /// Creates a surface sized to the container.
    ///
    /// # Errors
    /// Returns [`SurfaceError::Creation`] if the engine cannot be initialized.
    fn create(&mut self, size: SurfaceSize) -> Result<Self::Surface, SurfaceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_height_overrides_container() {
        let size = SurfaceSize::new(800, 600);
        assert_eq!(size.with_fixed_height(Some(400)), SurfaceSize::new(800, 400));
        assert_eq!(size.with_fixed_height(None), size);
    }
}
