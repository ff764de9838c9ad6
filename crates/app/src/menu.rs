//! Menu/command surface
//!
//! Device, display, and radius selection as discrete commands on the
//! window's context menu. Each group is mutually exclusive, with the
//! check state reflecting the current (or pending) selection.

use crate::app::CircleCamApp;
use crate::preview::PreviewTexture;
use capture_cam::DeviceRef;
use config::ALLOWED_RADII;
use eframe::egui;
use overlay::{DisplayId, DisplayRegistry, MaskShape};

impl CircleCamApp {
    pub(crate) fn show_menu(&mut self, ctx: &egui::Context, response: &egui::Response) {
        response.context_menu(|ui| {
            ui.menu_button("Camera source", |ui| self.camera_menu(ui));
            ui.menu_button("Display", |ui| self.display_menu(ui));
            ui.menu_button("Corner radius", |ui| self.radius_menu(ui));
            ui.separator();
            if ui.button("Quit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn camera_menu(&mut self, ui: &mut egui::Ui) {
        if self.devices.is_empty() {
            ui.label("No cameras detected");
            return;
        }
        let devices = self.devices.clone();
        for device in devices {
            let selected = self
                .context
                .capture
                .active_device()
                .map_or(false, |active| active.name == device.name);
            if ui.radio(selected, &device.name).clicked() {
                let ctx = ui.ctx().clone();
                self.select_device(device);
                self.apply_configuration(&ctx);
                ui.close_menu();
            }
        }
    }

    fn select_device(&mut self, device: DeviceRef) {
        // Drop the stale texture so a failed open shows a blank preview
        // rather than the previous device's last frame.
        self.preview = PreviewTexture::new();
        if let Err(err) = self.context.capture.switch(device.clone()) {
            log::warn!("camera switch failed: {err}");
        }
        let name = device.name;
        if let Err(err) = self
            .context
            .store
            .update(move |s| s.camera_source = Some(name))
        {
            log::warn!("could not persist camera selection: {err}");
        }
    }

    fn display_menu(&mut self, ui: &mut egui::Ui) {
        let displays = self.context.registry.list();
        if displays.is_empty() {
            ui.label("No displays detected");
            return;
        }
        let pending = self.context.store.settings().window_screen_id.clone();
        for display in displays {
            let selected = match &pending {
                Some(id) => display.id.as_str() == id,
                None => display.is_primary,
            };
            if ui.radio(selected, display.id.as_str()).clicked() {
                self.select_display(display.id);
                ui.close_menu();
            }
        }
    }

    fn select_display(&mut self, id: DisplayId) {
        if self.context.store.settings().window_screen_id.as_deref() == Some(id.as_str()) {
            return;
        }
        if let Err(err) = self
            .context
            .store
            .update(|s| s.window_screen_id = Some(id.as_str().to_owned()))
        {
            log::warn!("could not persist display selection: {err}");
        }
        // Live display migration is unsupported; the choice applies on the
        // next launch.
        self.restart_notice = true;
    }

    fn radius_menu(&mut self, ui: &mut egui::Ui) {
        for percent in ALLOWED_RADII {
            let selected = self.controller.mask().percent() == percent;
            if ui.radio(selected, format!("{percent}%")).clicked() {
                let ctx = ui.ctx().clone();
                self.select_radius(percent);
                self.apply_configuration(&ctx);
                ui.close_menu();
            }
        }
    }

    fn select_radius(&mut self, percent: u8) {
        let Some(mask) = MaskShape::new(percent) else {
            return;
        };
        self.controller.set_mask(mask);
        self.persist();
    }
}
