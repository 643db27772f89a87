pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod store;

// Re-export pixel-level scoring for convenience
pub use error::SigError;
pub use sigmatch_pixel::{pack, scorer};
