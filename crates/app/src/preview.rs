//! Live preview rendering
//!
//! Camera frames are uploaded into an egui texture and drawn aspect-fill:
//! scaled to cover the window with a centered crop, then clipped by the
//! mask's corner radius.

use capture_cam::FrameData;
use eframe::egui;

/// uv sub-rectangle that crops the source so it covers a target of the
/// given aspect without distortion (centered cover crop).
pub fn cover_uv(source_w: f32, source_h: f32, target_w: f32, target_h: f32) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if source_w <= 0.0 || source_h <= 0.0 || target_w <= 0.0 || target_h <= 0.0 {
        return full;
    }

    let source_aspect = source_w / source_h;
    let target_aspect = target_w / target_h;
    if source_aspect > target_aspect {
        // Source is wider than the target: crop left and right.
        let used = target_aspect / source_aspect;
        let margin = (1.0 - used) / 2.0;
        egui::Rect::from_min_max(egui::pos2(margin, 0.0), egui::pos2(1.0 - margin, 1.0))
    } else {
        let used = source_aspect / target_aspect;
        let margin = (1.0 - used) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, margin), egui::pos2(1.0, 1.0 - margin))
    }
}

/// Owns the GPU texture the camera frames are streamed into.
pub struct PreviewTexture {
    texture: Option<egui::TextureHandle>,
}

impl PreviewTexture {
    pub fn new() -> Self {
        Self { texture: None }
    }

    pub fn update(&mut self, ctx: &egui::Context, frame: &FrameData) {
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("camera-preview", image, egui::TextureOptions::LINEAR))
            }
        }
    }

    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }
}
