//! Headless surface with a linear price scale.
//!
//! Used wherever no real charting engine is attached (tests, server-side
//! replays). The vertical axis spans the candles' low/high range padded by a
//! margin on both sides; `y = 0` is the top of the padded range.

use crate::error::SurfaceError;
use crate::overlay::{OverlayHandle, OverlaySpec};
use crate::surface::{ChartSurface, Cursor, SurfaceFactory, SurfaceSize};
use price_overlay_domain::Candle;
use price_overlay_domain::entities::candle::price_bounds;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Default padding above and below the data range, as a share of the span.
pub const DEFAULT_SCALE_MARGIN: f64 = 0.1;

/// Operation counters, mostly useful for asserting on engine traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceCounters {
    /// Overlays created.
    pub overlays_created: u32,
    /// Overlays updated in place.
    pub overlays_updated: u32,
    /// Overlays removed.
    pub overlays_removed: u32,
    /// Resize calls.
    pub resizes: u32,
    /// Candle series replacements.
    pub candle_sets: u32,
    /// View fits.
    pub fits: u32,
}

/// In-memory [`ChartSurface`].
#[derive(Debug, Clone)]
pub struct MemorySurface {
    size: SurfaceSize,
    candles: Vec<Candle>,
    /// Padded (bottom, top) of the price scale.
    scale: Option<(f64, f64)>,
    scale_margin: f64,
    overlays: BTreeMap<OverlayHandle, OverlaySpec>,
    next_handle: u64,
    supports_update: bool,
    pan_zoom_enabled: bool,
    cursor: Cursor,
    destroyed: bool,
    counters: SurfaceCounters,
}

impl MemorySurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            candles: Vec::new(),
            scale: None,
            scale_margin: DEFAULT_SCALE_MARGIN,
            overlays: BTreeMap::new(),
            next_handle: 1,
            supports_update: true,
            pan_zoom_enabled: true,
            cursor: Cursor::Default,
            destroyed: false,
            counters: SurfaceCounters::default(),
        }
    }

    /// Sets the price scale padding.
    #[must_use]
    pub fn with_scale_margin(mut self, margin: f64) -> Self {
        self.scale_margin = margin.max(0.0);
        self.rebuild_scale();
        self
    }

    /// Emulates an engine lacking an in-place overlay update.
    #[must_use]
    pub fn with_update_support(mut self, supported: bool) -> Self {
        self.supports_update = supported;
        self
    }

    /// Inverse of [`ChartSurface::coordinate_to_price`].
    pub fn price_to_coordinate(&self, price: f64) -> Option<f64> {
        let (bottom, top) = self.scale?;
        if self.destroyed || self.size.height == 0 || !price.is_finite() {
            return None;
        }
        Some((top - price) / (top - bottom) * f64::from(self.size.height))
    }

    /// Padded (bottom, top) of the price scale, once data exists.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.scale
    }

    /// Parameters of a live overlay.
    pub fn overlay(&self, handle: OverlayHandle) -> Option<&OverlaySpec> {
        self.overlays.get(&handle)
    }

    /// Live overlays in creation order.
    pub fn overlays(&self) -> impl Iterator<Item = (OverlayHandle, &OverlaySpec)> {
        self.overlays.iter().map(|(h, s)| (*h, s))
    }

    /// Number of live overlays.
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Loaded candles.
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Whether native pan/zoom is currently enabled.
    pub fn pan_zoom_enabled(&self) -> bool {
        self.pan_zoom_enabled
    }

    /// Cursor last set.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether [`ChartSurface::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Operation counters.
    pub fn counters(&self) -> SurfaceCounters {
        self.counters
    }

    fn rebuild_scale(&mut self) {
        self.scale = price_bounds(&self.candles).map(|(low, high)| {
            let mut span = high - low;
            if span <= 0.0 {
                span = (high.abs() * 0.01).max(f64::EPSILON);
            }
            let pad = span * self.scale_margin;
            (low - pad, high + pad)
        });
    }
}

impl ChartSurface for MemorySurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = SurfaceSize::new(width, height);
        self.counters.resizes += 1;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn coordinate_to_price(&self, y: f64) -> Option<f64> {
        let (bottom, top) = self.scale?;
        let height = f64::from(self.size.height);
        if self.destroyed || height <= 0.0 || !y.is_finite() || y < 0.0 || y > height {
            return None;
        }
        Some(top - y / height * (top - bottom))
    }

    fn set_candles(&mut self, candles: &[Candle]) {
        self.candles = candles.to_vec();
        self.rebuild_scale();
        self.counters.candle_sets += 1;
    }

    fn fit_content(&mut self) {
        self.counters.fits += 1;
    }

    fn add_line_overlay(&mut self, spec: &OverlaySpec) -> OverlayHandle {
        let handle = OverlayHandle(self.next_handle);
        self.next_handle += 1;
        if self.destroyed {
            warn!(handle = %handle, "Overlay added to destroyed surface");
            return handle;
        }
        self.overlays.insert(handle, spec.clone());
        self.counters.overlays_created += 1;
        handle
    }

    fn update_line_overlay(
        &mut self,
        handle: OverlayHandle,
        spec: &OverlaySpec,
    ) -> Result<(), SurfaceError> {
        if !self.supports_update {
            return Err(SurfaceError::UpdateUnsupported);
        }
        if self.destroyed {
            return Err(SurfaceError::Destroyed);
        }
        if let Some(existing) = self.overlays.get_mut(&handle) {
            *existing = spec.clone();
            self.counters.overlays_updated += 1;
        }
        Ok(())
    }

    fn remove_line_overlay(&mut self, handle: OverlayHandle) -> bool {
        let removed = self.overlays.remove(&handle).is_some();
        if removed {
            self.counters.overlays_removed += 1;
        }
        removed
    }

    fn set_pan_zoom_enabled(&mut self, enabled: bool) {
        self.pan_zoom_enabled = enabled;
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        let freed = self.overlays.len();
        self.overlays.clear();
        self.candles.clear();
        self.scale = None;
        self.destroyed = true;
        debug!(freed_overlays = freed, "Memory surface destroyed");
    }
}

/// Factory producing [`MemorySurface`]s.
#[derive(Debug, Clone)]
pub struct MemorySurfaceFactory {
    scale_margin: f64,
    supports_update: bool,
    fail_with: Option<String>,
    created: u32,
}

impl MemorySurfaceFactory {
    /// Creates a factory with default surface settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scale_margin: DEFAULT_SCALE_MARGIN,
            supports_update: true,
            fail_with: None,
            created: 0,
        }
    }

    /// Price scale padding for created surfaces.
    #[must_use]
    pub fn with_scale_margin(mut self, margin: f64) -> Self {
        self.scale_margin = margin;
        self
    }

    /// Whether created surfaces support in-place overlay updates.
    #[must_use]
    pub fn with_update_support(mut self, supported: bool) -> Self {
        self.supports_update = supported;
        self
    }

    /// Makes every creation fail with `reason`.
    #[must_use]
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.fail_with = Some(reason.into());
        self
    }

    /// Number of surfaces created so far.
    pub fn created(&self) -> u32 {
        self.created
    }
}

impl Default for MemorySurfaceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceFactory for MemorySurfaceFactory {
    type Surface = MemorySurface;

    fn create(&mut self, size: SurfaceSize) -> Result<MemorySurface, SurfaceError> {
        if let Some(reason) = &self.fail_with {
            return Err(SurfaceError::Creation(reason.clone()));
        }
        self.created += 1;
        Ok(MemorySurface::new(size)
            .with_scale_margin(self.scale_margin)
            .with_update_support(self.supports_update))
    }
}
