//! Overlay window UI
//!
//! One borderless, transparent, always-on-top viewport. Every frame:
//! pull the newest camera frame, feed pointer events into the drag
//! tracker, draw the masked preview.

use crate::context::AppContext;
use crate::preview::{cover_uv, PreviewTexture};
use capture_cam::DeviceRef;
use eframe::egui;
use overlay::{OverlayController, Point};
use std::time::Duration;

pub struct CircleCamApp {
    pub(crate) context: AppContext,
    pub(crate) controller: OverlayController,
    pub(crate) preview: PreviewTexture,
    pub(crate) devices: Vec<DeviceRef>,
    pub(crate) restart_notice: bool,
}

impl CircleCamApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        context: AppContext,
        controller: OverlayController,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let devices = capture_cam::list_devices().unwrap_or_default();
        Self {
            context,
            controller,
            preview: PreviewTexture::new(),
            devices,
            restart_notice: false,
        }
    }

    /// Write the controller's state through the config store.
    pub(crate) fn persist(&mut self) {
        let controller = &self.controller;
        if let Err(err) = self.context.store.update(|s| controller.persist_into(s)) {
            log::warn!("could not persist settings: {err}");
        }
    }

    /// Explicit apply step after a state mutation (device switch, radius
    /// change): the next frame redraws with the updated configuration.
    pub(crate) fn apply_configuration(&mut self, ctx: &egui::Context) {
        ctx.request_repaint();
    }

    pub(crate) fn refresh_devices(&mut self) {
        match capture_cam::list_devices() {
            Ok(devices) => self.devices = devices,
            Err(err) => log::warn!("device enumeration failed: {err}"),
        }
    }

    fn poll_camera(&mut self, ctx: &egui::Context) {
        let Some(session) = self.context.capture.session() else {
            return;
        };
        if let Some(frame) = session.try_latest_frame() {
            self.preview.update(ctx, &frame);
        }
        if let Some(err) = session.take_error() {
            log::debug!("capture: {err}");
        }
    }

    /// Keep the model in step with the real window between drags; the
    /// windowing layer owns the authoritative outer position.
    fn sync_window_origin(&mut self, ctx: &egui::Context) {
        if self.controller.is_dragging() {
            return;
        }
        if let Some(outer) = ctx.input(|i| i.viewport().outer_rect) {
            self.controller.set_origin(Point::new(outer.min.x, outer.min.y));
        }
    }

    fn handle_drag(&mut self, ctx: &egui::Context) {
        let (pressed, down, released, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        // A release always ends the gesture, even with a menu open.
        if released && self.controller.pointer_up(&self.context.registry) {
            self.persist();
        }

        if ctx.memory(|m| m.any_popup_open()) {
            return;
        }

        if pressed {
            if let Some(pos) = pos {
                self.controller.pointer_down(Point::new(pos.x, pos.y));
            }
        } else if down {
            if let Some(pos) = pos {
                if let Some(origin) = self.controller.pointer_moved(Point::new(pos.x, pos.y)) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                        origin.x, origin.y,
                    )));
                }
            }
        }
    }

    fn draw_preview(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let rect = ui.max_rect();
        let rounding = self.controller.mask_radius_px();

        if let Some(texture) = self.preview.texture() {
            let source = texture.size_vec2();
            let uv = cover_uv(source.x, source.y, rect.width(), rect.height());
            egui::Image::new(texture)
                .uv(uv)
                .rounding(rounding)
                .paint_at(ui, rect);
        } else {
            // No live session: keep the masked silhouette visible.
            ui.painter()
                .rect_filled(rect, rounding, egui::Color32::from_black_alpha(160));
        }

        ui.interact(
            rect,
            ui.id().with("window-body"),
            egui::Sense::click_and_drag(),
        )
    }

    fn draw_restart_notice(&self, ui: &egui::Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter();
        let galley = painter.layout_no_wrap(
            "Restart to apply display change".to_owned(),
            egui::FontId::proportional(12.0),
            egui::Color32::WHITE,
        );
        let center = egui::pos2(rect.center().x, rect.max.y - 18.0);
        let bg = egui::Rect::from_center_size(center, galley.size() + egui::vec2(12.0, 6.0));
        painter.rect_filled(bg, 6.0, egui::Color32::from_black_alpha(180));
        painter.galley(bg.min + egui::vec2(6.0, 3.0), galley, egui::Color32::WHITE);
    }
}

impl eframe::App for CircleCamApp {
    /// Transparent outside the mask.
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_camera(ctx);
        self.sync_window_origin(ctx);
        self.handle_drag(ctx);

        // Re-enumerate on right-click so hot-plugged cameras show up in
        // the menu without a restart.
        if ctx.input(|i| i.pointer.secondary_pressed()) {
            self.refresh_devices();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let response = self.draw_preview(ui);
                self.show_menu(ctx, &response);
                if self.restart_notice {
                    self.draw_restart_notice(ui);
                }
            });

        // Live preview: keep painting without waiting for input events.
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
