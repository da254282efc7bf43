//! cb-core: shared record types, column schema, media defaults, and errors.
//!
//! This crate is the foundational dependency for the other cb-* crates. It
//! owns the [`MetadataRecord`] that flows from the filename parser through
//! the inventory aggregator into the record table, the [`IdentityKey`] used
//! to group and match those records, and the unified [`Error`] type.

pub mod error;
pub mod media;
pub mod record;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use media::*;
pub use record::{parse_files, Column, IdentityKey, MetadataRecord};
