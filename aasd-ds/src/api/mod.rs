//! HTTP API handlers for aasd-ds

pub mod catalog;
pub mod design;
pub mod health;
pub mod options;
pub mod ui;

pub use catalog::get_catalog;
pub use design::submit_design;
pub use health::health_routes;
pub use options::get_options;
pub use ui::{serve_app_js, serve_index};
