//! UI layer: app shell, form widgets, and preview textures.

pub mod app;
pub mod previews;
pub mod widgets;

pub use app::DeliveryFormApp;
