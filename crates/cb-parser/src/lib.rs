//! cb-parser: filename-to-metadata parser for a hyphen-delimited movie library.
//!
//! Extracts structured metadata from filenames such as
//! `"Inception-2010-1080p-x264-DTS-10bit.mkv"`.
//!
//! # Quick start
//!
//! ```
//! use cb_parser::parse;
//!
//! let r = parse("Inception-2010-1080p-x264-DTS-10bit.mkv");
//! assert_eq!(r.title, "Inception");
//! assert_eq!(r.year, "2010");
//! assert_eq!(r.resolution, "1080p");
//! assert_eq!(r.codec, "x264");
//! assert_eq!(r.audio, "DTS");
//! assert_eq!(r.bit_depth, "10");
//! ```

pub mod classify;
pub mod parts;
mod parser;

pub use parser::edition_label;
pub use parts::{split_extension, strip_part_suffix, PartName};

use cb_core::MetadataRecord;

/// Parse a clean filename into a [`MetadataRecord`].
///
/// The filename must already be free of any dotted part suffix; use
/// [`parse_file`] for names straight off disk.
///
/// # Examples
///
/// ```
/// let r = cb_parser::parse("Blade_Runner-DC-1982-720p.mkv");
/// assert_eq!(r.title, "Blade Runner");
/// assert_eq!(r.edition, "Director's Cut");
/// assert_eq!(r.year, "1982");
/// ```
pub fn parse(filename: &str) -> MetadataRecord {
    parser::parse(filename)
}

/// Parse a video filename as found on disk.
///
/// Any part suffix (`.Part1`, `.cd2`) is stripped before parsing, and the
/// original name is kept as the record's filename so that each part retains
/// its on-disk identity.
///
/// # Examples
///
/// ```
/// let r = cb_parser::parse_file("Movie-2003-1080p.Part2.mkv");
/// assert_eq!(r.title, "Movie");
/// assert_eq!(r.resolution, "1080p");
/// assert_eq!(r.filename, "Movie-2003-1080p.Part2.mkv");
/// ```
pub fn parse_file(filename: &str) -> MetadataRecord {
    let name = PartName::new(filename);
    if let Some(part) = name.part {
        tracing::trace!(filename, part, "stripped part suffix");
    }
    let mut record = parser::parse(&name.clean_filename());
    record.filename = filename.to_string();
    record
}
