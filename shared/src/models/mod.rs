//! Domain models for the Crop Advisor platform

mod climate;
mod crop;
mod disease;
mod recommendation;
mod soil;

pub use climate::*;
pub use crop::*;
pub use disease::*;
pub use recommendation::*;
pub use soil::*;
