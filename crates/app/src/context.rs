//! Application context
//!
//! Everything the UI mutates, constructed once in main and threaded
//! through explicitly; no ambient globals.

use crate::display_backend::XcapDisplayRegistry;
use capture_cam::{CaptureManager, NokhwaOpener};
use config::ConfigStore;

pub struct AppContext {
    pub store: ConfigStore,
    pub registry: XcapDisplayRegistry,
    pub capture: CaptureManager<NokhwaOpener>,
}
