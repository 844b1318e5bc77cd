//! Drawing export.
//!
//! Converts a surface into a serialisable snapshot and writes it to disk as
//! pretty-printed JSON, taking an exclusive lock and swapping the file into
//! place atomically.

mod snapshot;
mod storage;

pub use snapshot::{ExportCursor, ExportSnapshot};
pub use storage::{export_file_name, load_export, save_export};

#[cfg(test)]
mod tests;
