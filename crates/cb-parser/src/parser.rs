//! Core parsing logic for hyphen-delimited movie filenames.
//!
//! The grammar is `Title-[ED-]Year-[ED-]Director-Resolution-Tag-Tag...` where
//! every part after the year is optional. The parser works in four phases:
//! 1. Split the base name on `-` and drop split markers.
//! 2. Anchor on the first year token (the title must be non-empty).
//! 3. Resolve the edition boundary around the year, then anchor on the first
//!    resolution token after it.
//! 4. Partition into title, director, and tag bag; classify the tag bag.

use cb_core::MetadataRecord;

use crate::classify::{self, Tag};
use crate::parts::split_extension;

/// Two-letter edition codes and their labels. Unknown codes pass through.
const EDITIONS: [(&str, &str); 7] = [
    ("EX", "Extended"),
    ("UR", "Unrated"),
    ("UC", "Uncut"),
    ("DC", "Director's Cut"),
    ("RM", "Remastered"),
    ("SE", "Special Edition"),
    ("FC", "Final Cut"),
];

/// Translate an edition code to its label, or return it unchanged.
pub fn edition_label(code: &str) -> &str {
    EDITIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

/// Parse a clean filename (part suffix already stripped) into a record.
///
/// Location, canonical filename, and external subtitles are left for the
/// caller; they depend on where the file was found, not on its name.
pub fn parse(filename: &str) -> MetadataRecord {
    let (base_name, extension) = split_extension(filename);

    // Phase 1: tokens, minus `part1`/`cd2`/`1of2` junk.
    let tokens: Vec<&str> = base_name
        .split('-')
        .filter(|t| !classify::is_split_marker(t))
        .collect();

    // Phase 2: year anchor. Index 0 would leave no title, so it is skipped.
    let Some(year_index) = tokens
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, t)| classify::is_year(t))
        .map(|(i, _)| i)
    else {
        tracing::trace!(filename, "no year anchor, using fallback record");
        return MetadataRecord::fallback(base_name, extension);
    };

    // Phase 3a: edition boundary. A left-hand code needs a title token in
    // front of it.
    let mut edition = "";
    let mut title_end = year_index;
    let mut director_start = year_index + 1;

    if year_index > 1 && classify::is_edition_code(tokens[year_index - 1]) {
        edition = tokens[year_index - 1];
        title_end = year_index - 1;
    } else if year_index + 1 < tokens.len() && classify::is_edition_code(tokens[year_index + 1]) {
        edition = tokens[year_index + 1];
        director_start = year_index + 2;
    }

    // Phase 3b: resolution anchor.
    let resolution_index = (director_start..tokens.len()).find(|&i| classify::is_resolution(tokens[i]));

    let (director_tokens, resolution, tag_bag) = match resolution_index {
        Some(i) => (&tokens[director_start..i], tokens[i], &tokens[i + 1..]),
        None => (&tokens[director_start..], "", &tokens[tokens.len()..]),
    };

    // Phase 4: assemble.
    let mut record = MetadataRecord {
        title: join_tokens(&tokens[..title_end]),
        year: tokens[year_index].to_string(),
        edition: edition_label(edition).to_string(),
        director: join_tokens(director_tokens),
        format: extension.to_string(),
        resolution: resolution.to_string(),
        ..MetadataRecord::default()
    };

    for token in tag_bag {
        match classify::classify_tag(token) {
            Some(Tag::Codec(codec)) => record.codec = codec.to_string(),
            Some(Tag::BitDepth(depth)) => record.bit_depth = depth,
            Some(Tag::Audio(audio)) => record.audio = audio,
            None => tracing::trace!(token, "unrecognized tag dropped"),
        }
    }

    record
}

/// Rejoin tokens with `-` and turn underscores into spaces.
fn join_tokens(tokens: &[&str]) -> String {
    tokens.join("-").replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_example() {
        let r = parse("Inception-2010-1080p-x264-DTS-10bit.mkv");
        assert_eq!(r.title, "Inception");
        assert_eq!(r.year, "2010");
        assert_eq!(r.edition, "");
        assert_eq!(r.director, "");
        assert_eq!(r.format, "mkv");
        assert_eq!(r.resolution, "1080p");
        assert_eq!(r.codec, "x264");
        assert_eq!(r.audio, "DTS");
        assert_eq!(r.bit_depth, "10");
        assert_eq!(r.files, 1);
    }

    #[test]
    fn edition_left_of_year() {
        let r = parse("Blade_Runner-DC-1982-720p.mkv");
        assert_eq!(r.title, "Blade Runner");
        assert_eq!(r.edition, "Director's Cut");
        assert_eq!(r.year, "1982");
        assert_eq!(r.resolution, "720p");
        assert_eq!(r.director, "");
    }

    #[test]
    fn edition_right_of_year() {
        let r = parse("Aliens-1986-SE-James_Cameron-1080p-x265.mkv");
        assert_eq!(r.title, "Aliens");
        assert_eq!(r.edition, "Special Edition");
        assert_eq!(r.director, "James Cameron");
        assert_eq!(r.resolution, "1080p");
        assert_eq!(r.codec, "x265");
    }

    #[test]
    fn unknown_edition_code_passes_through() {
        let r = parse("Movie-2001-ZZ-720p.mp4");
        assert_eq!(r.edition, "ZZ");
        assert_eq!(r.title, "Movie");
    }

    #[test]
    fn non_adjacent_code_is_not_an_edition() {
        let r = parse("Movie-ZZ-Title-2001-720p.mp4");
        assert_eq!(r.edition, "");
        assert_eq!(r.title, "Movie-ZZ-Title");

        let r = parse("Movie-2001-Some_Director-ZZ-720p.mp4");
        assert_eq!(r.edition, "");
        assert_eq!(r.director, "Some Director-ZZ");
    }

    #[test]
    fn director_between_year_and_resolution() {
        let r = parse("Heat-1995-Michael_Mann-2160p-h.265-TrueHD-10bit.mkv");
        assert_eq!(r.director, "Michael Mann");
        assert_eq!(r.codec, "x265");
        assert_eq!(r.audio, "TrueHD");
        assert_eq!(r.bit_depth, "10");
    }

    #[test]
    fn no_resolution_means_director_absorbs_the_rest() {
        let r = parse("Heat-1995-Michael_Mann-x264-DTS.mkv");
        assert_eq!(r.director, "Michael Mann-x264-DTS");
        assert_eq!(r.resolution, "");
        assert_eq!(r.codec, "");
        assert_eq!(r.audio, "");
    }

    #[test]
    fn no_year_falls_back() {
        let r = parse("Home_Movies-1080p-x264.mkv");
        assert_eq!(r.title, "Home_Movies-1080p-x264");
        assert_eq!(r.format, "mkv");
        assert_eq!(r.year, "");
        assert_eq!(r.resolution, "");
        assert_eq!(r.codec, "");
        assert_eq!(r.director, "");
    }

    #[test]
    fn first_year_wins() {
        let r = parse("2001_A_Space_Odyssey-1968-1080p.mkv");
        assert_eq!(r.title, "2001 A Space Odyssey");
        assert_eq!(r.year, "1968");

        let r = parse("Blade_Runner-1982-2049-1080p.mkv");
        assert_eq!(r.year, "1982");
        assert_eq!(r.director, "2049");
    }

    #[test]
    fn leading_year_token_stays_in_title() {
        let r = parse("1917-2019-1080p.mkv");
        assert_eq!(r.title, "1917");
        assert_eq!(r.year, "2019");

        let r = parse("2012-1080p.mkv");
        assert_eq!(r.title, "2012-1080p");
        assert_eq!(r.year, "");
    }

    #[test]
    fn split_tokens_are_dropped() {
        let r = parse("Kill_Bill-2003-CD1-1080p-x264.mkv");
        assert_eq!(r.title, "Kill Bill");
        assert_eq!(r.director, "");
        assert_eq!(r.resolution, "1080p");

        let r = parse("Kill_Bill-1of2-2003-1080p.mkv");
        assert_eq!(r.title, "Kill Bill");
        assert_eq!(r.year, "2003");
    }

    #[test]
    fn tag_bag_first_match_wins_and_unknowns_drop() {
        let r = parse("Movie-2020-720p-BluRay-XviD-AAC2.0-GROUP.avi");
        assert_eq!(r.codec, "XVID");
        assert_eq!(r.audio, "AAC2.0");
        assert_eq!(r.bit_depth, "");
    }

    #[test]
    fn later_tags_overwrite_earlier_ones() {
        let r = parse("Movie-2020-720p-AAC-DTS.mkv");
        assert_eq!(r.audio, "DTS");
    }

    #[test]
    fn edition_labels() {
        assert_eq!(edition_label("EX"), "Extended");
        assert_eq!(edition_label("UR"), "Unrated");
        assert_eq!(edition_label("UC"), "Uncut");
        assert_eq!(edition_label("DC"), "Director's Cut");
        assert_eq!(edition_label("RM"), "Remastered");
        assert_eq!(edition_label("SE"), "Special Edition");
        assert_eq!(edition_label("FC"), "Final Cut");
        assert_eq!(edition_label("QQ"), "QQ");
        assert_eq!(edition_label(""), "");
    }

    #[test]
    fn missing_extension() {
        let r = parse("Movie-2020-720p");
        assert_eq!(r.format, "");
        assert_eq!(r.resolution, "720p");
    }
}
