//! Extension splitting and multi-part suffix stripping.
//!
//! A multi-part movie is stored as `Movie.Part1.mkv`, `Movie.Part2.mkv`, ...
//! The parser only ever sees the clean name (`Movie.mkv`); the original
//! filename stays the on-disk identity of each part.

use crate::classify;

/// Split a filename into `(stem, extension)` at the last dot.
///
/// The extension is returned without its dot. Leading dots do not start an
/// extension, so `".hidden"` has none.
pub fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) if filename[..idx].chars().any(|c| c != '.') => {
            (&filename[..idx], &filename[idx + 1..])
        }
        _ => (filename, ""),
    }
}

/// Strip a trailing dotted part suffix from a stem.
///
/// Returns the clean stem and the suffix that was removed, if any:
/// `"Movie.Part1"` becomes `("Movie", Some("Part1"))`, while `"Movie"` and
/// `"Mr.Smith"` are returned unchanged. A numeric piece after the part
/// suffix goes with it, so `"Movie.Part1.2"` becomes
/// `("Movie", Some("Part1.2"))`.
pub fn strip_part_suffix(stem: &str) -> (&str, Option<&str>) {
    let (base, suffix) = split_extension(stem);
    if suffix.is_empty() {
        return (stem, None);
    }
    if classify::is_part_suffix(suffix) {
        return (base, Some(&stem[base.len() + 1..]));
    }
    if suffix.bytes().all(|b| b.is_ascii_digit()) {
        let (inner, part) = split_extension(base);
        if !part.is_empty() && classify::is_part_suffix(part) {
            return (inner, Some(&stem[inner.len() + 1..]));
        }
    }
    (stem, None)
}

/// A video filename with its part suffix resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartName<'a> {
    /// The filename as found on disk.
    pub original: &'a str,
    /// Stem with any part suffix removed.
    pub stem: &'a str,
    /// Extension without the dot.
    pub extension: &'a str,
    /// The removed part suffix, e.g. `"Part2"`.
    pub part: Option<&'a str>,
}

impl<'a> PartName<'a> {
    pub fn new(original: &'a str) -> Self {
        let (raw_stem, extension) = split_extension(original);
        let (stem, part) = strip_part_suffix(raw_stem);
        Self {
            original,
            stem,
            extension,
            part,
        }
    }

    /// The filename handed to the parser: clean stem plus extension.
    pub fn clean_filename(&self) -> String {
        if self.extension.is_empty() {
            self.stem.to_string()
        } else {
            format!("{}.{}", self.stem, self.extension)
        }
    }
}
