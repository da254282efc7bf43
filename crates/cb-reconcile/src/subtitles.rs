//! Subtitle side table: filename stem to subtitle extension.
//!
//! A subtitle is registered under its raw stem and, when that stem ends in a
//! part suffix, under the stripped stem too. `Movie.Part1.srt` therefore
//! serves both `Movie.Part1.mkv` and `Movie.mkv`.

use std::collections::{HashMap, HashSet};

use cb_parser::{split_extension, strip_part_suffix};
use unicode_normalization::UnicodeNormalization;

/// NFC-normalize a name so decomposed (macOS-style) and composed forms match.
pub fn normalize_name(name: &str) -> String {
    name.nfc().collect()
}

/// Stem → subtitle extension lookup.
#[derive(Debug, Clone, Default)]
pub struct SubtitleIndex {
    by_stem: HashMap<String, String>,
    /// Registered subtitle filenames, for reporting unclaimed ones.
    files: Vec<String>,
}

impl SubtitleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subtitle file. The first registration of a stem wins.
    pub fn register(&mut self, filename: &str) {
        let filename = normalize_name(filename);
        let (stem, extension) = split_extension(&filename);

        self.by_stem
            .entry(stem.to_string())
            .or_insert_with(|| extension.to_string());

        let (clean, part) = strip_part_suffix(stem);
        if part.is_some() {
            self.by_stem
                .entry(clean.to_string())
                .or_insert_with(|| extension.to_string());
        }

        tracing::trace!(filename = %filename, stem, "registered subtitle");
        self.files.push(filename.clone());
    }

    /// Subtitle extension for a video filename, if one was registered.
    ///
    /// The raw stem is tried first, then its part-stripped form.
    pub fn lookup(&self, filename: &str) -> Option<&str> {
        self.lookup_entry(filename).map(|(_, ext)| ext)
    }

    fn lookup_entry(&self, filename: &str) -> Option<(&str, &str)> {
        let filename = normalize_name(filename);
        let (stem, _) = split_extension(&filename);
        let (clean, _) = strip_part_suffix(stem);

        for key in [stem, clean] {
            if let Some((k, v)) = self.by_stem.get_key_value(key) {
                return Some((k.as_str(), v.as_str()));
            }
        }
        None
    }

    /// Registered subtitle files that none of `filenames` resolves to.
    pub fn unclaimed<'a, I>(&self, filenames: I) -> Vec<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let claimed: HashSet<&str> = filenames
            .into_iter()
            .filter_map(|f| self.lookup_entry(f).map(|(stem, _)| stem))
            .collect();

        self.files
            .iter()
            .filter(|f| {
                let (stem, _) = split_extension(f);
                let (clean, _) = strip_part_suffix(stem);
                !claimed.contains(stem) && !claimed.contains(clean)
            })
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
