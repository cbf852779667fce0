//! HTTP handlers

pub mod classify;
pub mod health;
pub mod recommendation;
pub mod reference;

pub use classify::classify;
pub use health::health_check;
pub use recommendation::recommend;
pub use reference::{list_climate, list_crops, list_soils};
