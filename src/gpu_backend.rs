// src/gpu_backend.rs
use crate::settings::PickerStyle;
use eframe::egui;

pub fn native_options(picker: &PickerStyle) -> eframe::NativeOptions {
    let size = egui::vec2(picker.window_width, picker.window_height);
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Stock Market")
            .with_inner_size(size)
            .with_resizable(false),
        multisampling: 4,
        depth_buffer: 0,
        stencil_buffer: 0,
        renderer: eframe::Renderer::Wgpu,
        centered: true,
        ..Default::default()
    }
}
