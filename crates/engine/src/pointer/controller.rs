//! Drag state machine for price lines.

use super::{DragState, InteractionState, PointerEvent, PriceLineChange, hit_test};
use crate::settings::InteractionConfig;
use price_overlay_domain::PriceLine;
use price_overlay_domain::value_objects::{is_active_price, round_price};
use price_overlay_surface::{ChartSurface, Cursor};
use tracing::{debug, trace};

/// Long-lived owner of the drag state.
///
/// The controller reads the surface's coordinate mapping and the current
/// line list; it never touches overlays. Its only writes to the surface are
/// pan/zoom suspension and the cursor.
#[derive(Debug)]
pub struct PointerController {
    /// Interaction tuning.
    config: InteractionConfig,
    /// The in-progress drag, if any.
    drag: Option<DragState>,
    /// Cursor last presented.
    cursor: Cursor,
}

impl PointerController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            drag: None,
            cursor: Cursor::Default,
        }
    }

    /// Dispatches one pointer event. Returns a change when a drag moved a line.
    pub fn handle<S: ChartSurface>(
        &mut self,
        surface: &mut S,
        lines: &[PriceLine],
        event: PointerEvent,
    ) -> Option<PriceLineChange> {
        match event {
            PointerEvent::Down { y } => {
                self.pointer_down(surface, lines, y);
                None
            }
            PointerEvent::Move { y, button_pressed } => {
                self.pointer_move(surface, lines, y, button_pressed)
            }
            PointerEvent::Up => {
                self.pointer_up(surface);
                None
            }
        }
    }

    /// Starts a drag if the pointer grabs a line. Returns whether it did.
    ///
    /// Ignored while a drag is already in progress.
    pub fn pointer_down<S: ChartSurface>(
        &mut self,
        surface: &mut S,
        lines: &[PriceLine],
        y: f64,
    ) -> bool {
        if self.drag.is_some() {
            trace!("Pointer down ignored during drag");
            return false;
        }
        let Some(click_price) = surface.coordinate_to_price(y) else {
            return false;
        };
        let Some(line) = hit_test(lines, click_price, self.config.drag_threshold_ratio) else {
            return false;
        };

        debug!(
            line_id = %line.id,
            start_price = line.price,
            click_price,
            "Drag started"
        );
        self.drag = Some(DragState {
            line_id: line.id.clone(),
            start_price: line.price,
        });
        surface.set_pan_zoom_enabled(false);
        self.present(surface, Cursor::Grabbing);
        true
    }

    /// Handles pointer movement.
    ///
    /// While dragging, returns the proposed price for the dragged line.
    /// Unmappable prices, or prices that round to zero or below, yield
    /// nothing and keep the drag alive. While idle with no button held, updates the hover cursor.
    pub fn pointer_move<S: ChartSurface>(
        &mut self,
        surface: &mut S,
        lines: &[PriceLine],
        y: f64,
        button_pressed: bool,
    ) -> Option<PriceLineChange> {
        let hover_price = surface.coordinate_to_price(y);

        if let Some(drag) = &self.drag {
            let price = hover_price
                .map(|p| round_price(p, self.config.price_decimals))
                .filter(|p| is_active_price(*p))?;
            trace!(line_id = %drag.line_id, price, "Drag moved");
            return Some(PriceLineChange {
                line_id: drag.line_id.clone(),
                price,
            });
        }

        if button_pressed {
            return None;
        }

        let over_line = hover_price
            .and_then(|p| hit_test(lines, p, self.config.drag_threshold_ratio))
            .is_some();
        let cursor = if over_line {
            Cursor::ResizeVertical
        } else {
            Cursor::Default
        };
        self.present(surface, cursor);
        None
    }

    /// Ends the drag, if any, restoring pan/zoom and the cursor.
    pub fn pointer_up<S: ChartSurface>(&mut self, surface: &mut S) -> Option<DragState> {
        let drag = self.drag.take()?;
        debug!(
            line_id = %drag.line_id,
            start_price = drag.start_price,
            "Drag ended"
        );
        surface.set_pan_zoom_enabled(true);
        self.present(surface, Cursor::Default);
        Some(drag)
    }

    /// Force-clears any drag and cursor feedback.
    pub fn release<S: ChartSurface>(&mut self, surface: &mut S) {
        if self.pointer_up(surface).is_none() {
            self.present(surface, Cursor::Default);
        }
    }

    /// Ends the drag if its line is no longer grabbable in `lines`.
    pub fn retain<S: ChartSurface>(&mut self, surface: &mut S, lines: &[PriceLine]) {
        let Some(drag) = &self.drag else {
            return;
        };
        let still_there = lines
            .iter()
            .any(|line| line.id == drag.line_id && line.is_grabbable());
        if !still_there {
            debug!(line_id = %drag.line_id, "Dragged line disappeared");
            self.pointer_up(surface);
        }
    }

    /// Current interaction state.
    pub fn state(&self) -> InteractionState {
        if self.drag.is_some() {
            InteractionState::Dragging
        } else {
            InteractionState::Idle
        }
    }

    /// The in-progress drag.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Cursor last presented.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Interaction tuning.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    fn present<S: ChartSurface>(&mut self, surface: &mut S, cursor: Cursor) {
        if self.cursor != cursor {
            surface.set_cursor(cursor);
            self.cursor = cursor;
        }
    }
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use price_overlay_domain::{Candle, PriceLineKind};
    use price_overlay_surface::{MemorySurface, SurfaceSize};

    fn surface() -> MemorySurface {
        let mut surface = MemorySurface::new(SurfaceSize::new(800, 400));
        surface.set_candles(&[
            Candle::new(60, 100.0, 104.0, 96.0, 103.0, 1.0),
            Candle::new(120, 103.0, 106.0, 99.0, 100.0, 1.0),
        ]);
        surface
    }

    fn y_of(surface: &MemorySurface, price: f64) -> f64 {
        surface.price_to_coordinate(price).unwrap()
    }

    fn lines() -> Vec<PriceLine> {
        vec![PriceLine::preset(PriceLineKind::StopLoss, "sl", 100.0)]
    }

    #[test]
    fn test_pointer_down_grabs_line_within_threshold() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let y = y_of(&surface, 100.3);

        assert!(controller.pointer_down(&mut surface, &lines(), y));

        let drag = controller.drag().unwrap();
        assert_eq!(drag.line_id.as_str(), "sl");
        assert_eq!(drag.start_price, 100.0);
        assert_eq!(controller.state(), InteractionState::Dragging);
        assert!(!surface.pan_zoom_enabled());
        assert_eq!(surface.cursor(), Cursor::Grabbing);
    }

    #[test]
    fn test_pointer_down_misses_outside_threshold() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let y = y_of(&surface, 100.6);

        assert!(!controller.pointer_down(&mut surface, &lines(), y));
        assert_eq!(controller.state(), InteractionState::Idle);
        assert!(surface.pan_zoom_enabled());
    }

    #[test]
    fn test_pointer_down_outside_plot_is_a_miss() {
        let mut surface = surface();
        let mut controller = PointerController::default();

        assert!(!controller.pointer_down(&mut surface, &lines(), -25.0));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drag_emits_in_event_order() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let lines = lines();
        let y = y_of(&surface, 100.1);
        controller.pointer_down(&mut surface, &lines, y);

        let mut emitted = Vec::new();
        for price in [101.0, 102.0, 101.5] {
            let y = y_of(&surface, price);
            if let Some(change) = controller.pointer_move(&mut surface, &lines, y, true) {
                emitted.push(change);
            }
        }

        let prices: Vec<f64> = emitted.iter().map(|c| c.price).collect();
        assert_eq!(prices, vec![101.0, 102.0, 101.5]);
        assert!(emitted.iter().all(|c| c.line_id.as_str() == "sl"));
    }

    #[test]
    fn test_drag_rounds_to_configured_decimals() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let lines = lines();
        let y = y_of(&surface, 100.0);
        controller.pointer_down(&mut surface, &lines, y);

        let y = y_of(&surface, 101.123456);
        let change = controller
            .pointer_move(&mut surface, &lines, y, true)
            .unwrap();

        assert_eq!(change.price, 101.1235);
    }

    #[test]
    fn test_null_mapping_during_drag_is_noop() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let lines = lines();
        let y = y_of(&surface, 100.0);
        controller.pointer_down(&mut surface, &lines, y);

        assert!(controller.pointer_move(&mut surface, &lines, -40.0, true).is_none());
        assert!(controller.pointer_move(&mut surface, &lines, 900.0, true).is_none());
        assert!(controller.is_dragging());

        let y = y_of(&surface, 99.0);
        let change = controller.pointer_move(&mut surface, &lines, y, true);
        assert_eq!(change.map(|c| c.price), Some(99.0));
    }

    #[test]
    fn test_drag_never_emits_price_rounding_to_zero() {
        let mut surface = MemorySurface::new(SurfaceSize::new(800, 400)).with_scale_margin(0.0);
        surface.set_candles(&[Candle::new(60, 0.00005, 0.0001, 0.00002, 0.00008, 1.0)]);
        let mut controller = PointerController::default();
        let lines = vec![PriceLine::preset(PriceLineKind::StopLoss, "sl", 0.00005)];
        let y = y_of(&surface, 0.00005);
        assert!(controller.pointer_down(&mut surface, &lines, y));

        let y = y_of(&surface, 0.00004);
        assert!(controller.pointer_move(&mut surface, &lines, y, true).is_none());
        assert!(controller.is_dragging());

        let y = y_of(&surface, 0.00008);
        let change = controller.pointer_move(&mut surface, &lines, y, true);
        assert_eq!(change.map(|c| c.price), Some(0.0001));
    }

    #[test]
    fn test_second_pointer_down_ignored() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let lines = vec![
            PriceLine::preset(PriceLineKind::StopLoss, "sl", 100.0),
            PriceLine::preset(PriceLineKind::TakeProfit, "tp", 104.0),
        ];
        let y = y_of(&surface, 100.0);
        controller.pointer_down(&mut surface, &lines, y);

        let y = y_of(&surface, 104.0);
        assert!(!controller.pointer_down(&mut surface, &lines, y));
        assert_eq!(controller.drag().unwrap().line_id.as_str(), "sl");
    }

    #[test]
    fn test_pointer_up_restores_surface() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let y = y_of(&surface, 100.0);
        controller.pointer_down(&mut surface, &lines(), y);

        let ended = controller.pointer_up(&mut surface);

        assert_eq!(ended.map(|d| d.line_id.to_string()), Some("sl".to_string()));
        assert!(surface.pan_zoom_enabled());
        assert_eq!(surface.cursor(), Cursor::Default);
        assert!(controller.pointer_up(&mut surface).is_none());
    }

    #[test]
    fn test_hover_cursor_feedback() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let lines = lines();

        let y = y_of(&surface, 100.2);
        controller.pointer_move(&mut surface, &lines, y, false);
        assert_eq!(surface.cursor(), Cursor::ResizeVertical);
        assert!(!controller.is_dragging());

        let y = y_of(&surface, 103.0);
        controller.pointer_move(&mut surface, &lines, y, false);
        assert_eq!(surface.cursor(), Cursor::Default);

        controller.pointer_move(&mut surface, &lines, -5.0, false);
        assert_eq!(surface.cursor(), Cursor::Default);
    }

    #[test]
    fn test_idle_move_with_button_is_native_pan() {
        let mut surface = surface();
        let mut controller = PointerController::default();

        let y = y_of(&surface, 100.0);
        let change = controller.pointer_move(&mut surface, &lines(), y, true);

        assert!(change.is_none());
        assert_eq!(surface.cursor(), Cursor::Default);
    }

    #[test]
    fn test_retain_ends_drag_when_line_removed() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let y = y_of(&surface, 100.0);
        controller.pointer_down(&mut surface, &lines(), y);

        controller.retain(&mut surface, &lines());
        assert!(controller.is_dragging());

        controller.retain(&mut surface, &[PriceLine::new("sl", 0.0).with_draggable(true)]);
        assert!(!controller.is_dragging());
        assert!(surface.pan_zoom_enabled());
    }

    #[test]
    fn test_handle_dispatches_events() {
        let mut surface = surface();
        let mut controller = PointerController::default();
        let lines = lines();

        let y = y_of(&surface, 100.0);
        assert!(controller.handle(&mut surface, &lines, PointerEvent::Down { y }).is_none());
        let y = y_of(&surface, 100.5);
        let change = controller.handle(
            &mut surface,
            &lines,
            PointerEvent::Move {
                y,
                button_pressed: true,
            },
        );
        assert_eq!(change.map(|c| c.price), Some(100.5));
        controller.handle(&mut surface, &lines, PointerEvent::Up);
        assert_eq!(controller.state(), InteractionState::Idle);
    }
}
