//! Overlay window controller
//!
//! Owns the single window's geometry, edge anchors, and mask shape.
//! Restores placement from persisted settings before the window is shown,
//! tracks drags, re-anchors on drag end, and writes state back into the
//! settings for persistence. All recoveries here are silent: a missing
//! display falls back to the primary, a missing primary to a synthesized
//! frame, and window creation never fails for placement reasons.

use crate::anchor::{AnchorPair, Edge, EdgeAnchor};
use crate::display::{DisplayId, DisplayRegistry, FALLBACK_FRAME};
use crate::drag::DragTracker;
use crate::geometry::{Point, Size, WindowGeometry};
use crate::mask::MaskShape;
use config::Settings;

pub struct OverlayController {
    geometry: WindowGeometry,
    anchors: AnchorPair,
    mask: MaskShape,
    display: Option<DisplayId>,
    drag: DragTracker,
}

impl OverlayController {
    /// Rebuild window state from persisted settings.
    ///
    /// The stored display id is resolved against the live registry; a
    /// disconnected display falls back to the primary. The origin is then
    /// reconstructed from the per-axis edge anchors against that display's
    /// current frame, clamped on-screen where the window fits. The caller
    /// applies the origin before the window becomes visible.
    pub fn restore(settings: &Settings, registry: &dyn DisplayRegistry) -> Self {
        let size = Size::new(settings.window_width, settings.window_height);
        let anchors = AnchorPair {
            x: EdgeAnchor {
                edge: Edge::from_index(settings.window_x_edge_index),
                distance: settings.window_x_distance_to_edge,
            },
            y: EdgeAnchor {
                edge: Edge::from_index(settings.window_y_edge_index),
                distance: settings.window_y_distance_to_edge,
            },
        };

        let display = match settings.window_screen_id.as_deref().map(DisplayId::new) {
            Some(id) => registry.resolve(&id).or_else(|| {
                log::warn!("persisted display {id} not attached, falling back to primary");
                registry.primary()
            }),
            None => registry.primary(),
        };

        let frame = display
            .as_ref()
            .map(|d| d.frame)
            .unwrap_or_else(|| {
                log::warn!("no displays enumerable, using fallback frame");
                FALLBACK_FRAME
            });

        let origin = anchors.resolve_clamped(&frame, size);

        Self {
            geometry: WindowGeometry { origin, size },
            anchors,
            mask: MaskShape::from_persisted(settings.window_radius),
            display: display.map(|d| d.id),
            drag: DragTracker::new(),
        }
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    pub fn origin(&self) -> Point {
        self.geometry.origin
    }

    pub fn size(&self) -> Size {
        self.geometry.size
    }

    pub fn anchors(&self) -> AnchorPair {
        self.anchors
    }

    pub fn display(&self) -> Option<&DisplayId> {
        self.display.as_ref()
    }

    pub fn mask(&self) -> MaskShape {
        self.mask
    }

    /// Corner radius for the current size. Changes whenever the size or
    /// the mask percent does; applying it twice with unchanged inputs
    /// produces the same visual state.
    pub fn mask_radius_px(&self) -> f32 {
        self.mask.corner_radius_px(self.geometry.size)
    }

    pub fn set_mask(&mut self, mask: MaskShape) {
        self.mask = mask;
    }

    /// The geometry model tolerates resize even though the current UI
    /// exposes no resize affordance.
    pub fn set_size(&mut self, size: Size) {
        if size.width > 0.0 && size.height > 0.0 {
            self.geometry.size = size;
        }
    }

    /// Track a window move performed outside a drag (the windowing layer
    /// reports the authoritative outer position).
    pub fn set_origin(&mut self, origin: Point) {
        self.geometry.origin = origin;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Pointer pressed in window-local coordinates: a drag begins.
    pub fn pointer_down(&mut self, local: Point) {
        self.drag.pointer_down(local);
    }

    /// Pointer moved. During a drag, updates the origin and returns it so
    /// the caller can move the real window synchronously. Spurious moves
    /// return None.
    pub fn pointer_moved(&mut self, local: Point) -> Option<Point> {
        let new_origin = self.drag.pointer_moved(local, self.geometry.origin)?;
        self.geometry.origin = new_origin;
        Some(new_origin)
    }

    /// Pointer released. Ends the drag and re-anchors the window against
    /// the display it now occupies. Returns true when the anchors changed
    /// and the caller should persist.
    pub fn pointer_up(&mut self, registry: &dyn DisplayRegistry) -> bool {
        if !self.drag.pointer_up() {
            return false;
        }
        self.reanchor(registry);
        true
    }

    fn reanchor(&mut self, registry: &dyn DisplayRegistry) {
        let display = registry.display_for(&self.geometry.rect());
        let frame = display.as_ref().map(|d| d.frame).unwrap_or(FALLBACK_FRAME);
        self.anchors = AnchorPair::compute(self.geometry.origin, &frame);
        self.display = display.map(|d| d.id);
    }

    /// Write geometry, anchors, mask, and display identity back into the
    /// settings. The caller owns the durable write.
    pub fn persist_into(&self, settings: &mut Settings) {
        settings.window_width = self.geometry.size.width;
        settings.window_height = self.geometry.size.height;
        settings.window_radius = self.mask.percent();
        settings.window_screen_id = self.display.as_ref().map(|id| id.as_str().to_owned());
        settings.window_x_distance_to_edge = self.anchors.x.distance;
        settings.window_y_distance_to_edge = self.anchors.y.distance;
        settings.window_x_edge_index = self.anchors.x.edge.index();
        settings.window_y_edge_index = self.anchors.y.edge.index();
    }
}
