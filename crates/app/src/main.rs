//! CircleCam - an always-on-top circular camera overlay

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod display_backend;
mod menu;
mod preview;

use crate::app::CircleCamApp;
use crate::context::AppContext;
use crate::display_backend::XcapDisplayRegistry;
use capture_cam::{list_devices, resolve_preferred, CaptureManager, NokhwaOpener};
use config::ConfigStore;
use eframe::egui;
use overlay::OverlayController;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let store = ConfigStore::load_or_create()?;
    let registry = XcapDisplayRegistry::new();

    // Placement is restored before the window exists, so the first visible
    // frame is already at its final origin.
    let controller = OverlayController::restore(store.settings(), &registry);

    let mut capture = CaptureManager::new(NokhwaOpener);
    let devices = list_devices().unwrap_or_else(|err| {
        log::warn!("device enumeration failed: {err}");
        Vec::new()
    });
    match resolve_preferred(&devices, store.settings().camera_source.as_deref()) {
        Some(device) => {
            if let Err(err) = capture.switch(device) {
                log::warn!("preview unavailable: {err}");
            }
        }
        None => log::warn!("no capture devices attached, preview stays blank"),
    }

    let context = AppContext { store, registry, capture };

    let origin = controller.origin();
    let size = controller.size();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CircleCam")
            .with_inner_size([size.width, size.height])
            .with_position([origin.x, origin.y])
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "CircleCam",
        native_options,
        Box::new(move |cc| Ok(Box::new(CircleCamApp::new(cc, context, controller)))),
    )
    .map_err(|err| anyhow::anyhow!("event loop failed: {err}"))
}
