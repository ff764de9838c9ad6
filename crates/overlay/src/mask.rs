//! Clip mask shape
//!
//! The window content is clipped to a rounded rectangle parametrized by a
//! percent of the maximum corner radius. 100 yields a full circle on a
//! square window, 0 square corners.

use crate::geometry::Size;
use config::{ALLOWED_RADII, DEFAULT_WINDOW_RADIUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskShape {
    percent: u8,
}

impl MaskShape {
    /// Accepts only the discrete percent values the menu offers.
    pub fn new(percent: u8) -> Option<Self> {
        ALLOWED_RADII.contains(&percent).then_some(Self { percent })
    }

    /// Build from a persisted value, substituting the default for anything
    /// outside the allowed set.
    pub fn from_persisted(percent: u8) -> Self {
        Self::new(percent).unwrap_or_else(|| {
            log::warn!("persisted radius {percent}% not in allowed set, using default");
            Self { percent: DEFAULT_WINDOW_RADIUS }
        })
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Corner radius in logical points for a window of `size`. Recomputed
    /// whenever the size or percent changes; never exceeds half the
    /// shorter side.
    pub fn corner_radius_px(&self, size: Size) -> f32 {
        self.percent as f32 / 100.0 * size.min_side() / 2.0
    }

    pub fn is_circle(&self) -> bool {
        self.percent == 100
    }
}

impl Default for MaskShape {
    fn default() -> Self {
        Self { percent: DEFAULT_WINDOW_RADIUS }
    }
}
