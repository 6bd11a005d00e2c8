//! Shared helpers: output file handling and progress display.

pub mod fs;
pub mod progress;

pub use fs::{absolute, atomic_write, ensure_dir, remove_file_if_exists, reset_dir};
pub use progress::{MultiProgress, ProgressBar};
