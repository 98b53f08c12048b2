//! Chart session: top-level owner of a surface and its overlays.

use crate::error::EngineError;
use crate::pointer::{PointerController, PointerEvent, PriceLineChange};
use crate::settings::SessionConfig;
use crate::sync::{PriceLineSynchronizer, SyncReport};
use price_overlay_domain::{Candle, PriceLine, PriceLineId, validate_price_lines};
use price_overlay_surface::{ChartSurface, SurfaceFactory, SurfaceSize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Callback receiving `(line id, proposed price)` during a drag.
pub type PriceLineChangeCallback = Box<dyn FnMut(&PriceLineId, f64)>;

/// What the session currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// No candles: an empty-state placeholder, no surface.
    Empty,
    /// A live chart surface.
    Chart,
}

/// Counters over the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Surfaces created.
    pub surfaces_created: u32,
    /// Surfaces torn down.
    pub teardowns: u32,
    /// Change notifications delivered.
    pub changes_emitted: u64,
    /// Price-line lists rejected by validation.
    pub rejected_updates: u32,
}

/// Owns a chart surface, its overlay index and the pointer controller.
///
/// Mirrors the props contract of a chart component: candles, price lines,
/// height and an optional change callback.
pub struct ChartSession<F: SurfaceFactory> {
    /// Session id for log correlation.
    id: Uuid,
    /// Surface factory.
    factory: F,
    /// Configuration.
    config: SessionConfig,
    /// Last known container size.
    container: SurfaceSize,
    /// Current candles.
    candles: Vec<Candle>,
    /// Current price lines.
    price_lines: Vec<PriceLine>,
    /// Live surface, absent in empty state or after teardown.
    surface: Option<F::Surface>,
    /// Overlay index writer.
    synchronizer: PriceLineSynchronizer,
    /// Drag state owner.
    controller: PointerController,
    /// Whether pointer events are being dispatched.
    listeners_attached: bool,
    /// Change callback.
    on_change: Option<PriceLineChangeCallback>,
    /// Lifetime counters.
    stats: SessionStats,
}

impl<F: SurfaceFactory> ChartSession<F> {
    /// Creates a session in empty state. No surface exists until candles arrive.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] if `config` fails validation.
    pub fn new(
        factory: F,
        container: SurfaceSize,
        config: SessionConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let controller = PointerController::new(config.interaction.clone());
        Ok(Self {
            id: Uuid::new_v4(),
            factory,
            config,
            container,
            candles: Vec::new(),
            price_lines: Vec::new(),
            surface: None,
            synchronizer: PriceLineSynchronizer::new(),
            controller,
            listeners_attached: false,
            on_change: None,
            stats: SessionStats::default(),
        })
    }

    /// Registers the change callback, replacing any previous one.
    ///
    /// Lines cannot be grabbed while no callback is registered.
    pub fn on_price_line_change(&mut self, callback: impl FnMut(&PriceLineId, f64) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Removes the change callback, ending any drag in progress.
    pub fn clear_price_line_change(&mut self) {
        self.on_change = None;
        if let Some(surface) = self.surface.as_mut() {
            self.controller.release(surface);
        }
    }

    /// Replaces the candle series.
    ///
    /// An empty series switches to the empty state and tears down any live
    /// surface. Otherwise the surface is created if needed, loaded, fitted,
    /// and every price line is redrawn against the new bounds.
    ///
    /// # Errors
    /// Returns an error if the surface cannot be created.
    pub fn set_candles(&mut self, candles: Vec<Candle>) -> Result<(), EngineError> {
        self.candles = candles;
        if self.candles.is_empty() {
            if self.surface.is_some() {
                info!(session_id = %self.id, "No candles, switching to empty state");
                self.teardown();
            }
            return Ok(());
        }
        self.render_data()
    }

    /// Replaces the price-line list and synchronizes the overlays.
    ///
    /// # Errors
    /// Rejects duplicate ids and NaN prices; the previous list stays in effect.
    pub fn set_price_lines(&mut self, lines: Vec<PriceLine>) -> Result<SyncReport, EngineError> {
        if let Err(e) = validate_price_lines(&lines) {
            self.stats.rejected_updates += 1;
            warn!(session_id = %self.id, error = %e, "Rejected price line update");
            return Err(e.into());
        }
        self.price_lines = lines;

        let Some(surface) = self.surface.as_mut() else {
            return Ok(SyncReport::default());
        };
        let report = self.synchronizer.synchronize(surface, &self.price_lines)?;
        self.controller.retain(surface, &self.price_lines);
        if report.has_changes() {
            debug!(
                session_id = %self.id,
                created = report.created,
                updated = report.updated,
                removed = report.removed,
                "Price lines synchronized"
            );
        }
        Ok(report)
    }

    /// Dispatches a pointer event. Returns the change delivered to the
    /// callback, if any.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<PriceLineChange> {
        if !self.listeners_attached {
            return None;
        }
        let surface = self.surface.as_mut()?;
        let lines: &[PriceLine] = if self.on_change.is_some() {
            &self.price_lines
        } else {
            &[]
        };

        let change = self.controller.handle(surface, lines, event)?;
        if let Some(callback) = self.on_change.as_mut() {
            callback(&change.line_id, change.price);
            self.stats.changes_emitted += 1;
        }
        Some(change)
    }

    /// Reacts to a container size change without recreating overlays.
    pub fn container_resized(&mut self, width: u32, height: u32) {
        self.container = SurfaceSize::new(width, height);
        let size = self.surface_size();
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size.width, size.height);
            debug!(
                session_id = %self.id,
                width = size.width,
                height = size.height,
                "Surface resized"
            );
        }
    }

    /// Changes the fixed height. A different value re-initializes the surface.
    ///
    /// # Errors
    /// Rejects a zero height, keeping the current surface. Otherwise returns
    /// an error if the new surface cannot be created.
    pub fn set_height(&mut self, height: Option<u32>) -> Result<(), EngineError> {
        if self.config.height == height {
            return Ok(());
        }
        if height == Some(0) {
            warn!(session_id = %self.id, "Rejected zero height");
            return Err(EngineError::InvalidConfig(
                "height must be greater than zero".to_string(),
            ));
        }
        self.config.height = height;
        if self.surface.is_none() {
            return Ok(());
        }
        info!(session_id = %self.id, height = ?height, "Height changed, re-initializing surface");
        self.teardown();
        self.render_data()
    }

    /// Tears the surface down: detach pointer listeners, remove overlays,
    /// destroy the surface. Safe to call any number of times.
    pub fn teardown(&mut self) {
        self.listeners_attached = false;
        let Some(mut surface) = self.surface.take() else {
            return;
        };
        self.controller.release(&mut surface);
        let removed = self.synchronizer.clear(&mut surface);
        surface.destroy();
        self.stats.teardowns += 1;
        info!(session_id = %self.id, removed_overlays = removed, "Session torn down");
    }

    fn render_data(&mut self) -> Result<(), EngineError> {
        if self.candles.is_empty() {
            return Ok(());
        }
        if self.surface.is_none() {
            let size = self.surface_size();
            let surface = self.factory.create(size)?;
            self.surface = Some(surface);
            self.listeners_attached = true;
            self.stats.surfaces_created += 1;
            info!(
                session_id = %self.id,
                width = size.width,
                height = size.height,
                "Surface created"
            );
        }

        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        surface.set_candles(&self.candles);
        if self.config.fit_content_on_data {
            surface.fit_content();
        }
        self.synchronizer.redraw(surface, &self.price_lines)?;
        debug!(session_id = %self.id, candles = self.candles.len(), "Candles applied");
        Ok(())
    }

    fn surface_size(&self) -> SurfaceSize {
        self.container.with_fixed_height(self.config.height)
    }

    /// What the session currently shows.
    pub fn presentation(&self) -> Presentation {
        if self.surface.is_some() {
            Presentation::Chart
        } else {
            Presentation::Empty
        }
    }

    /// Session id.
    pub fn session_id(&self) -> Uuid {
        self.id
    }

    /// The live surface.
    pub fn surface(&self) -> Option<&F::Surface> {
        self.surface.as_ref()
    }

    /// The surface factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Overlay index.
    pub fn synchronizer(&self) -> &PriceLineSynchronizer {
        &self.synchronizer
    }

    /// Pointer controller.
    pub fn controller(&self) -> &PointerController {
        &self.controller
    }

    /// Current candles.
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Current price lines.
    pub fn price_lines(&self) -> &[PriceLine] {
        &self.price_lines
    }

    /// Configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether pointer events are being dispatched.
    pub fn listeners_attached(&self) -> bool {
        self.listeners_attached
    }

    /// Lifetime counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}

impl<F: SurfaceFactory> Drop for ChartSession<F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
