//! Monitor enumeration over xcap

use overlay::{DisplayId, DisplayInfo, DisplayRegistry, Rect};
use xcap::Monitor;

pub struct XcapDisplayRegistry;

impl XcapDisplayRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayRegistry for XcapDisplayRegistry {
    fn list(&self) -> Vec<DisplayInfo> {
        let monitors = match Monitor::all() {
            Ok(monitors) => monitors,
            Err(err) => {
                log::warn!("monitor enumeration failed: {err}");
                return Vec::new();
            }
        };

        monitors
            .iter()
            .map(|monitor| DisplayInfo {
                id: DisplayId::new(display_identity(monitor)),
                frame: Rect::new(
                    monitor.x() as f32,
                    monitor.y() as f32,
                    monitor.width() as f32,
                    monitor.height() as f32,
                ),
                is_primary: monitor.is_primary(),
            })
            .collect()
    }
}

/// Monitor names are stable across reboots where enumeration order is
/// not; an unnamed monitor gets an id-derived identity instead.
fn display_identity(monitor: &Monitor) -> String {
    let name = monitor.name();
    if name.is_empty() {
        format!("display-{}", monitor.id())
    } else {
        name.to_string()
    }
}
