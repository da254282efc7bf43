//! Token classifier: predicates over a single hyphen-delimited token.
//!
//! Every predicate matches the whole token. Classification inside the tag
//! bag is ordered (codec, then bit depth, then audio) and the first match
//! wins; tokens matching nothing are dropped without complaint since
//! upstream filenames are uncontrolled.

use cb_core::Codec;
use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

/// Candidate edition code. Only promoted to an edition next to the year.
static EDITION_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());

static RESOLUTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:[0-9]{3,4}p|4K|8K|SD)$").unwrap());

/// H.264/H.265 in any punctuation, the x264/x265 encoder names, and XviD.
static CODEC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:[hx][.\-_]?26[45]|xvid)$").unwrap());

/// Prefix match; the rest of the token (channels, flavor) is kept verbatim.
static AUDIO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:AAC|AC|DD|DDP|DTS|TrueHD|FLAC|MP3|PCM)").unwrap());

static BIT_DEPTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[0-9].*(?:bit|bps)$").unwrap());

/// `cd2`, `disc 1`, `part1`, `pt3`, `2_of_3`.
static PART_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:cd|disc|disk|part|pt)\s*|[0-9]+_of_)[0-9]+$").unwrap()
});

/// `1of2`, `1 of 2`.
static N_OF_M_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[0-9]+\s?of\s?[0-9]+$").unwrap());

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Exactly four ASCII digits.
pub fn is_year(token: &str) -> bool {
    YEAR_RE.is_match(token)
}

/// Exactly two uppercase ASCII letters.
pub fn is_edition_code(token: &str) -> bool {
    EDITION_CODE_RE.is_match(token)
}

/// `480p`, `1080p`, `2160p`, `4K`, `8K`, `SD` (case-insensitive).
pub fn is_resolution(token: &str) -> bool {
    RESOLUTION_RE.is_match(token)
}

pub fn is_codec(token: &str) -> bool {
    CODEC_RE.is_match(token)
}

pub fn is_audio(token: &str) -> bool {
    AUDIO_RE.is_match(token)
}

pub fn is_bit_depth(token: &str) -> bool {
    BIT_DEPTH_RE.is_match(token)
}

/// A multi-part marker, either as a whole token or as a dotted suffix of a
/// stem (`Movie.Part1`).
pub fn is_part_suffix(token: &str) -> bool {
    PART_SUFFIX_RE.is_match(token)
}

/// Any split marker that must never reach the title/director/tag partition.
pub fn is_split_marker(token: &str) -> bool {
    is_part_suffix(token) || N_OF_M_RE.is_match(token)
}

// ---------------------------------------------------------------------------
// Tag bag
// ---------------------------------------------------------------------------

/// A classified tag-bag token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Codec(Codec),
    /// Bit depth with the `bit` suffix removed, e.g. `"10"`.
    BitDepth(String),
    /// Audio tag, verbatim, e.g. `"DTS-HD"` or `"AAC2.0"`.
    Audio(String),
}

/// Replace encoding-mismatch artifacts of the middle dot with `.` so that
/// tags like `H·264` or `DDP5Â·1` classify the same as their dotted form.
pub fn clean_tag(token: &str) -> String {
    token.replace("Â·", ".").replace('\u{00B7}', ".")
}

/// Classify a single tag-bag token. Returns `None` for anything unrecognized.
pub fn classify_tag(token: &str) -> Option<Tag> {
    let tag = clean_tag(token);

    if is_codec(&tag) {
        Some(Tag::Codec(Codec::from_tag(&tag)))
    } else if is_bit_depth(&tag) {
        Some(Tag::BitDepth(strip_bit_suffix(&tag)))
    } else if is_audio(&tag) {
        Some(Tag::Audio(tag))
    } else {
        None
    }
}

fn strip_bit_suffix(tag: &str) -> String {
    let trimmed = tag.trim();
    let cut = trimmed.len().saturating_sub(3);
    match trimmed.get(cut..) {
        Some(suffix) if suffix.eq_ignore_ascii_case("bit") => trimmed[..cut].trim().to_string(),
        _ => trimmed.to_string(),
    }
}
