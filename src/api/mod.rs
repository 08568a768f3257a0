//! HTTP API handlers for lexos

pub mod health;
pub mod lookup;
pub mod ui;

pub use health::health_routes;
pub use lookup::lookup_routes;
pub use ui::ui_routes;
