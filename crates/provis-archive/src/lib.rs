//! ZIP extraction with path sanitization.
//!
//! # Architecture
//!
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `extract.rs` - Extraction pipeline
//! - `entry.rs` - Shared types

pub use entry::{Entry, EntryKind, ExtractReport};
pub use error::{Error, Result};
pub use extract::{extract, extract_file};
pub use sanitize::{SanitizedPath, sanitize_path};

pub mod entry;
mod error;
mod extract;
mod sanitize;
