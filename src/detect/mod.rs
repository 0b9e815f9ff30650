//! Landmark formation detection.

pub mod trinity;

pub use trinity::{detect, is_tromino, Trinity};
