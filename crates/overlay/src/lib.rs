//! Window placement core for CircleCam
//!
//! Drag tracking, edge-anchored positioning, display identity, and
//! mask-shape state for the single overlay window. Pure logic with no
//! windowing toolkit dependency; the app crate owns the real window and
//! feeds pointer events in.

pub mod anchor;
pub mod controller;
pub mod display;
pub mod drag;
pub mod geometry;
pub mod mask;

pub use anchor::{AnchorPair, Edge, EdgeAnchor};
pub use controller::OverlayController;
pub use display::{DisplayId, DisplayInfo, DisplayRegistry, FALLBACK_FRAME};
pub use drag::DragTracker;
pub use geometry::{Point, Rect, Size, WindowGeometry};
pub use mask::MaskShape;
