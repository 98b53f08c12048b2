//! Keyed reconciler for price-line overlays.

use crate::error::EngineError;
use price_overlay_domain::{PriceLine, PriceLineId, validate_price_lines};
use price_overlay_surface::{ChartSurface, OverlayHandle, OverlaySpec, SurfaceError};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// An overlay the synchronizer has registered for a price line.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOverlay {
    /// Owning price line.
    pub line_id: PriceLineId,
    /// Surface handle.
    pub handle: OverlayHandle,
    /// Overlay parameters last applied to the surface.
    pub spec: OverlaySpec,
}

/// Result of one synchronization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Overlays created.
    pub created: u32,
    /// Overlays updated (in place or by replacement).
    pub updated: u32,
    /// Overlays left as they were.
    pub unchanged: u32,
    /// Overlays removed.
    pub removed: u32,
    /// Lines skipped because their price is not positive.
    pub inactive: u32,
}

impl SyncReport {
    /// Whether the pass touched the surface at all.
    pub fn has_changes(&self) -> bool {
        self.created + self.updated + self.removed > 0
    }
}

/// Keeps the overlay index of one surface in step with a price-line list.
///
/// This is the only writer of overlays on the surface.
#[derive(Debug, Default)]
pub struct PriceLineSynchronizer {
    /// Rendered overlays by line id.
    index: HashMap<PriceLineId, RenderedOverlay>,
}

impl PriceLineSynchronizer {
    /// Creates an empty synchronizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    /// Applies the minimal create/update/remove set for `lines`.
    ///
    /// # Errors
    /// Rejects lists with duplicate ids or NaN prices before touching the
    /// surface.
    pub fn synchronize<S: ChartSurface>(
        &mut self,
        surface: &mut S,
        lines: &[PriceLine],
    ) -> Result<SyncReport, EngineError> {
        self.apply(surface, lines, false)
    }

    /// Like [`synchronize`](Self::synchronize), but re-applies every
    /// existing overlay so it is redrawn against new data bounds.
    ///
    /// # Errors
    /// Same as [`synchronize`](Self::synchronize).
    pub fn redraw<S: ChartSurface>(
        &mut self,
        surface: &mut S,
        lines: &[PriceLine],
    ) -> Result<SyncReport, EngineError> {
        self.apply(surface, lines, true)
    }

    /// Removes every overlay and empties the index. Returns how many were removed.
    pub fn clear<S: ChartSurface>(&mut self, surface: &mut S) -> usize {
        let count = self.index.len();
        for (_, rendered) in self.index.drain() {
            surface.remove_line_overlay(rendered.handle);
        }
        if count > 0 {
            debug!(removed = count, "Cleared price line overlays");
        }
        count
    }

    fn apply<S: ChartSurface>(
        &mut self,
        surface: &mut S,
        lines: &[PriceLine],
        force: bool,
    ) -> Result<SyncReport, EngineError> {
        if let Err(e) = validate_price_lines(lines) {
            warn!(error = %e, "Rejected price line list");
            return Err(e.into());
        }

        let mut report = SyncReport::default();
        let mut active: HashSet<&str> = HashSet::with_capacity(lines.len());

        for line in lines {
            if !line.is_active() {
                report.inactive += 1;
                continue;
            }
            active.insert(line.id.as_str());
            let spec = OverlaySpec::from(line);

            match self.index.get_mut(&line.id) {
                None => {
                    let handle = surface.add_line_overlay(&spec);
                    debug!(
                        line_id = %line.id,
                        handle = %handle,
                        price = spec.price,
                        "Created overlay"
                    );
                    self.index.insert(
                        line.id.clone(),
                        RenderedOverlay {
                            line_id: line.id.clone(),
                            handle,
                            spec,
                        },
                    );
                    report.created += 1;
                }
                Some(rendered) if !force && rendered.spec == spec => {
                    report.unchanged += 1;
                }
                Some(rendered) => {
                    if let Err(e) = surface.update_line_overlay(rendered.handle, &spec) {
                        if e != SurfaceError::UpdateUnsupported {
                            warn!(
                                line_id = %line.id,
                                error = %e,
                                "Overlay update failed, replacing"
                            );
                        }
                        surface.remove_line_overlay(rendered.handle);
                        rendered.handle = surface.add_line_overlay(&spec);
                    }
                    debug!(
                        line_id = %line.id,
                        handle = %rendered.handle,
                        price = spec.price,
                        "Updated overlay"
                    );
                    rendered.spec = spec;
                    report.updated += 1;
                }
            }
        }

        let stale: Vec<PriceLineId> = self
            .index
            .keys()
            .filter(|id| !active.contains(id.as_str()))
            .cloned()
            .collect();

        for id in stale {
            if let Some(rendered) = self.index.remove(&id) {
                surface.remove_line_overlay(rendered.handle);
                debug!(line_id = %id, handle = %rendered.handle, "Removed overlay");
                report.removed += 1;
            }
        }

        Ok(report)
    }

    /// Ids with a live overlay.
    pub fn rendered_ids(&self) -> impl Iterator<Item = &PriceLineId> {
        self.index.keys()
    }

    /// The overlay rendered for `id`.
    pub fn get(&self, id: &str) -> Option<&RenderedOverlay> {
        self.index.get(id)
    }

    /// Surface handle of the overlay rendered for `id`.
    pub fn handle_for(&self, id: &str) -> Option<OverlayHandle> {
        self.index.get(id).map(|r| r.handle)
    }

    /// Number of rendered overlays.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
