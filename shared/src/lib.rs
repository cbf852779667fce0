//! Shared types and models for the Crop Advisor platform
//!
//! This crate holds everything that has no I/O: the reference tables, the
//! planting suitability scorer, the disease taxonomy and input validation.
//! It is used by the backend server and, via WASM, by the browser.

pub mod error;
pub mod models;
pub mod reference;
pub mod scoring;
pub mod taxonomy;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use reference::*;
pub use scoring::*;
pub use taxonomy::*;
pub use types::*;
pub use validation::*;
