//! Display registry model
//!
//! Displays are identified by a stable string id, never a positional
//! index: enumeration order is not guaranteed across hotplug or reboot.
//! Frames are queried live at resolve time, never cached across restarts.

use crate::geometry::Rect;
use std::fmt;

/// Frame used when no display can be enumerated at all. Window creation
/// must still succeed in that case.
pub const FALLBACK_FRAME: Rect = Rect { x: 0.0, y: 0.0, width: 1920.0, height: 1080.0 };

/// Stable display identity, persisted across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayId(String);

impl DisplayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One attached display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayInfo {
    pub id: DisplayId,
    pub frame: Rect,
    pub is_primary: bool,
}

/// Contract the placement core needs from the OS display layer. The app
/// crate implements it over the real monitor API; tests use a fixture.
pub trait DisplayRegistry {
    /// Currently attached displays with live frames.
    fn list(&self) -> Vec<DisplayInfo>;

    /// Look up a display by its stable identity.
    fn resolve(&self, id: &DisplayId) -> Option<DisplayInfo> {
        self.list().into_iter().find(|d| d.id == *id)
    }

    /// The primary display, or the first enumerated one when the OS marks
    /// none as primary. None only when nothing is attached.
    fn primary(&self) -> Option<DisplayInfo> {
        let displays = self.list();
        displays
            .iter()
            .find(|d| d.is_primary)
            .cloned()
            .or_else(|| displays.into_iter().next())
    }

    /// The display whose frame most overlaps `rect`, falling back to the
    /// primary when the window is entirely off every display.
    fn display_for(&self, rect: &Rect) -> Option<DisplayInfo> {
        let displays = self.list();
        displays
            .iter()
            .map(|d| (d, d.frame.overlap_area(rect)))
            .filter(|(_, area)| *area > 0.0)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(d, _)| d.clone())
            .or_else(|| self.primary())
    }
}
