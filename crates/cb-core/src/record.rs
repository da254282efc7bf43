//! The metadata record, its identity key, and the canonical column schema.
//!
//! A [`MetadataRecord`] is both the parser's output for a single file and a
//! row of the record table. The table is a typed collection of these; the
//! positional column contract only matters at the edges, where rows are read
//! from or written to a tabular store.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// A column of the record table, in canonical positional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Title,
    Year,
    Edition,
    Director,
    Format,
    Resolution,
    Codec,
    Audio,
    BitDepth,
    Location,
    ExternalSubtitles,
    FilenameOrIsbn,
    Duration,
    Files,
    BonusMaterials,
}

impl Column {
    /// Every column, in the exact order tables are written.
    pub const ALL: [Column; 15] = [
        Column::Title,
        Column::Year,
        Column::Edition,
        Column::Director,
        Column::Format,
        Column::Resolution,
        Column::Codec,
        Column::Audio,
        Column::BitDepth,
        Column::Location,
        Column::ExternalSubtitles,
        Column::FilenameOrIsbn,
        Column::Duration,
        Column::Files,
        Column::BonusMaterials,
    ];

    /// Columns overwritten on a matched remote row. The identity columns
    /// (Title, Year, Edition, Resolution) are never among them.
    pub const MUTABLE: [Column; 8] = [
        Column::Codec,
        Column::Audio,
        Column::BitDepth,
        Column::Director,
        Column::Format,
        Column::Location,
        Column::FilenameOrIsbn,
        Column::Files,
    ];

    /// Header text used by the tabular store.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Year => "Year",
            Self::Edition => "Edition",
            Self::Director => "Director",
            Self::Format => "Format",
            Self::Resolution => "Resolution",
            Self::Codec => "Codec",
            Self::Audio => "Audio",
            Self::BitDepth => "Bit Depth",
            Self::Location => "Location",
            Self::ExternalSubtitles => "External Subtitles",
            Self::FilenameOrIsbn => "Filename or ISBN",
            Self::Duration => "Duration",
            Self::Files => "Files",
            Self::BonusMaterials => "Bonus Materials",
        }
    }

    /// Look up a column by its header text. Surrounding whitespace is ignored.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// IdentityKey
// ---------------------------------------------------------------------------

/// Composite (Title, Year, Edition, Resolution) key.
///
/// Two records describe the same movie iff their keys are equal. Director,
/// codec, audio, bit depth, location, and file count are deliberately left
/// out: they are attributes that may change between syncs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey {
    pub title: String,
    pub year: String,
    pub edition: String,
    pub resolution: String,
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.title, self.year, self.edition, self.resolution
        )
    }
}

// ---------------------------------------------------------------------------
// MetadataRecord
// ---------------------------------------------------------------------------

/// One movie: parsed from a filename, aggregated across parts, or loaded
/// from the record table.
///
/// Every textual field uses the empty string for "absent" so that the record
/// maps one-to-one onto a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Edition")]
    pub edition: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Format")]
    pub format: String,
    #[serde(rename = "Resolution")]
    pub resolution: String,
    #[serde(rename = "Codec")]
    pub codec: String,
    #[serde(rename = "Audio")]
    pub audio: String,
    #[serde(rename = "Bit Depth")]
    pub bit_depth: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "External Subtitles")]
    pub external_subtitles: String,
    #[serde(rename = "Filename or ISBN")]
    pub filename: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Files")]
    pub files: u32,
    #[serde(rename = "Bonus Materials")]
    pub bonus_materials: String,
}

impl Default for MetadataRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            year: String::new(),
            edition: String::new(),
            director: String::new(),
            format: String::new(),
            resolution: String::new(),
            codec: String::new(),
            audio: String::new(),
            bit_depth: String::new(),
            location: String::new(),
            external_subtitles: String::new(),
            filename: String::new(),
            duration: String::new(),
            files: 1,
            bonus_materials: String::new(),
        }
    }
}

impl MetadataRecord {
    /// The degraded record for a filename with no year: the whole base name
    /// becomes the title and only the format is kept.
    pub fn fallback(base_name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            title: base_name.into(),
            format: format.into(),
            ..Self::default()
        }
    }

    /// Build a record from `(header, value)` pairs of a table row.
    ///
    /// This is the schema-conforming constructor: unknown headers are
    /// dropped, missing columns stay empty, and values are stored verbatim
    /// except Files, which is coerced via [`parse_files`].
    pub fn from_columns<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::default();
        for (header, value) in cells {
            if let Some(column) = Column::from_header(header) {
                record.set(column, value);
            }
        }
        record
    }

    /// Row values in [`Column::ALL`] order.
    pub fn to_columns(&self) -> Vec<String> {
        Column::ALL.iter().map(|c| self.get(*c)).collect()
    }

    /// The value of a single column as text.
    pub fn get(&self, column: Column) -> String {
        match column {
            Column::Files => self.files.to_string(),
            other => self.text(other).to_string(),
        }
    }

    /// Set a single column from text. Files is coerced, never rejected.
    pub fn set(&mut self, column: Column, value: &str) {
        match column {
            Column::Title => self.title = value.to_string(),
            Column::Year => self.year = value.to_string(),
            Column::Edition => self.edition = value.to_string(),
            Column::Director => self.director = value.to_string(),
            Column::Format => self.format = value.to_string(),
            Column::Resolution => self.resolution = value.to_string(),
            Column::Codec => self.codec = value.to_string(),
            Column::Audio => self.audio = value.to_string(),
            Column::BitDepth => self.bit_depth = value.to_string(),
            Column::Location => self.location = value.to_string(),
            Column::ExternalSubtitles => self.external_subtitles = value.to_string(),
            Column::FilenameOrIsbn => self.filename = value.to_string(),
            Column::Duration => self.duration = value.to_string(),
            Column::Files => self.files = parse_files(value),
            Column::BonusMaterials => self.bonus_materials = value.to_string(),
        }
    }

    fn text(&self, column: Column) -> &str {
        match column {
            Column::Title => &self.title,
            Column::Year => &self.year,
            Column::Edition => &self.edition,
            Column::Director => &self.director,
            Column::Format => &self.format,
            Column::Resolution => &self.resolution,
            Column::Codec => &self.codec,
            Column::Audio => &self.audio,
            Column::BitDepth => &self.bit_depth,
            Column::Location => &self.location,
            Column::ExternalSubtitles => &self.external_subtitles,
            Column::FilenameOrIsbn => &self.filename,
            Column::Duration => &self.duration,
            Column::Files => "",
            Column::BonusMaterials => &self.bonus_materials,
        }
    }

    /// The (Title, Year, Edition, Resolution) identity of this record.
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            title: self.title.clone(),
            year: self.year.clone(),
            edition: self.edition.clone(),
            resolution: self.resolution.clone(),
        }
    }

    /// Copy the mutable columns from `other`. Returns the columns whose
    /// values actually changed.
    pub fn update_mutable_from(&mut self, other: &MetadataRecord) -> Vec<Column> {
        let mut changed = Vec::new();
        for column in Column::MUTABLE {
            let incoming = other.get(column);
            if self.get(column) != incoming {
                self.set(column, &incoming);
                changed.push(column);
            }
        }
        changed
    }
}

/// Coerce a Files cell to a positive count. Anything that is not a positive
/// integer after trimming (empty, text, zero) counts as a single file.
/// Spreadsheet exports write whole numbers as `2.0`, which reads as 2.
pub fn parse_files(value: &str) -> u32 {
    let value = value.trim();
    let whole = value
        .split_once('.')
        .filter(|(_, frac)| frac.bytes().all(|b| b == b'0'))
        .map_or(value, |(int, _)| int);
    match whole.parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => 1,
    }
}
