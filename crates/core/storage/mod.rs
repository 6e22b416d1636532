//! Dataset loading.
//!
//! The incident table is read once at startup; there is no write path.

mod loader;

pub use loader::{load_path, load_reader};
