//! File I/O and file-name sanitizing

mod fs;
mod sanitize;

pub use fs::{FsError, ensure_dir, parse_dataset_from_bytes, read_dataset, write_artifact};
pub use sanitize::{ILLEGAL_CHARS, MAX_LENGTH, SUBSTITUTE, UNTITLED, safe_file_name, sanitize_file_name};
