pub mod pack;
pub mod scorer;

// Re-export commonly used items
pub use pack::{pack_argb, pack_rgb, GRAY};
pub use scorer::score;
