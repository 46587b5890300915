// lib.rs

pub mod app;
pub mod app_ui;
pub mod chart;
pub mod error;
pub mod fetch;
pub mod gpu_backend;
pub mod loader;
pub mod picker;
pub mod quotes;
pub mod scale;
pub mod settings;
pub mod surface;
