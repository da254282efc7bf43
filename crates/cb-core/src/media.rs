//! Media-domain enums and default extension sets.
//!
//! Enums implement `Display` manually so the string stored in a record
//! column is exactly the normalized form.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Video codecs recognized in filename tags.
///
/// Every H.264-family tag collapses to [`Codec::X264`]; only an explicit 265
/// or XviD tag selects the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Codec {
    #[serde(rename = "x264")]
    X264,
    #[serde(rename = "x265")]
    X265,
    #[serde(rename = "XVID")]
    Xvid,
}

impl Codec {
    /// Normalize a codec tag that has already matched the codec pattern.
    pub fn from_tag(tag: &str) -> Self {
        let lower = tag.to_lowercase();
        if lower.contains("xvid") {
            Self::Xvid
        } else if lower.contains("265") {
            Self::X265
        } else {
            Self::X264
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X264 => "x264",
            Self::X265 => "x265",
            Self::Xvid => "XVID",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FileKind
// ---------------------------------------------------------------------------

/// How a discovered file participates in a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// A video container; parsed into a record.
    Video,
    /// A subtitle file; registered in the subtitle side table.
    Subtitle,
    /// Anything else; ignored.
    Other,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Subtitle => write!(f, "subtitle"),
            Self::Other => write!(f, "other"),
        }
    }
}

// ---------------------------------------------------------------------------
// FileClassifier
// ---------------------------------------------------------------------------

/// Decides the [`FileKind`] of a filename from its extension.
///
/// Extensions are stored lowercase without the dot and compared
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileClassifier {
    video: HashSet<String>,
    subtitle: HashSet<String>,
}

impl FileClassifier {
    pub fn new<V, S>(video: V, subtitle: S) -> Self
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let normalize = |e: &str| e.trim_start_matches('.').to_lowercase();
        Self {
            video: video.into_iter().map(|e| normalize(e.as_ref())).collect(),
            subtitle: subtitle.into_iter().map(|e| normalize(e.as_ref())).collect(),
        }
    }

    /// Classify an extension (without the dot).
    pub fn kind_of_extension(&self, extension: &str) -> FileKind {
        let extension = extension.to_lowercase();
        if self.video.contains(&extension) {
            FileKind::Video
        } else if self.subtitle.contains(&extension) {
            FileKind::Subtitle
        } else {
            FileKind::Other
        }
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_VIDEO_EXTENSIONS, DEFAULT_SUBTITLE_EXTENSIONS)
    }
}

// ---------------------------------------------------------------------------
// LocalFile
// ---------------------------------------------------------------------------

/// A file discovered in the library, ready for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    /// Full path on disk.
    pub path: PathBuf,
    /// Location folder the file was found in, e.g. `"/Sci-Fi"`.
    pub location: String,
    /// File name, Unicode-normalized by the scanner.
    pub file_name: String,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Video container extensions recognized by default (lowercase, no dot).
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "mpg", "mpeg", "webm", "ts", "flv", "iso",
];

/// Subtitle extensions recognized by default (lowercase, no dot).
pub const DEFAULT_SUBTITLE_EXTENSIONS: &[&str] = &["srt", "sub", "idx", "ass", "ssa", "vtt", "smi"];

/// OS housekeeping files that never count as library content.
pub const DEFAULT_IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Folder name that marks an unfiled item at the Location level.
pub const UNTITLED_FOLDER: &str = "untitled folder";
