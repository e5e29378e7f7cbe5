//! OverrideCycles mini-language expansion.
//!
//! An OverrideCycles value is a semicolon-delimited list of read segments,
//! each segment a run-length encoding over the letters N (skipped), Y
//! (sequenced), I (index) and U (UMI). `Y151;I8;N151` expands to 151 `Y`s for
//! Read 1, 8 `I`s for Index 1, and 151 `N`s for Read 2. Which segment maps to
//! which read is positional and fixed by the segment count.

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    #[error("OverrideCycles {0:?} cannot be parsed to a cycle sequence")]
    Unparseable(String),

    #[error("OverrideCycles {0:?} defines too many read segments")]
    TooManySegments(String),
}

/// A read segment declared in the Reads section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadSegment {
    Read1,
    Read2,
    Index1,
    Index2,
}

impl ReadSegment {
    pub const ALL: [ReadSegment; 4] = [
        ReadSegment::Read1,
        ReadSegment::Read2,
        ReadSegment::Index1,
        ReadSegment::Index2,
    ];

    /// The Reads-section key carrying this segment's cycle count.
    pub fn key(&self) -> &'static str {
        match self {
            ReadSegment::Read1 => "Read1Cycles",
            ReadSegment::Read2 => "Read2Cycles",
            ReadSegment::Index1 => "Index1Cycles",
            ReadSegment::Index2 => "Index2Cycles",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|segment| segment.key() == key)
    }
}

impl fmt::Display for ReadSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:[NYIU][0-9]+)+$").expect("segment pattern"))
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([NYIU])([0-9]+)").expect("token pattern"))
}

/// Expand an OverrideCycles value into per-segment cycle strings.
///
/// The positional segment-to-read mapping is fixed by the segment count:
/// one segment is Read 1 alone; two are Read 1 and Read 2; three insert
/// Index 1 between them; four insert Index 1 and Index 2. Five or more
/// segments are rejected, as is any segment that deviates from the grammar.
pub fn expand(spec: &str) -> Result<IndexMap<ReadSegment, String>, CycleError> {
    let segments: Vec<&str> = spec.split(';').collect();
    let slots: &[ReadSegment] = match segments.len() {
        1 => &[ReadSegment::Read1],
        2 => &[ReadSegment::Read1, ReadSegment::Read2],
        3 => &[ReadSegment::Read1, ReadSegment::Index1, ReadSegment::Read2],
        4 => &[
            ReadSegment::Read1,
            ReadSegment::Index1,
            ReadSegment::Index2,
            ReadSegment::Read2,
        ],
        _ => return Err(CycleError::TooManySegments(spec.to_string())),
    };

    let mut expanded = IndexMap::new();
    for (segment, slot) in segments.iter().zip(slots) {
        expanded.insert(*slot, expand_segment(spec, segment)?);
    }
    Ok(expanded)
}

/// Expand one `LETTER DIGITS` run-length segment, e.g. `U8N2` -> `UUUUUUUUNN`.
fn expand_segment(spec: &str, segment: &str) -> Result<String, CycleError> {
    if !segment_re().is_match(segment) {
        return Err(CycleError::Unparseable(spec.to_string()));
    }
    let mut out = String::new();
    for caps in token_re().captures_iter(segment) {
        let letter = caps[1].chars().next().expect("single-letter token");
        let count: usize = caps[2]
            .parse()
            .map_err(|_| CycleError::Unparseable(spec.to_string()))?;
        out.extend(std::iter::repeat(letter).take(count));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_expand_three_segments() {
        let expanded = expand("Y151;I8;N151").unwrap();
        assert_eq!(expanded[&ReadSegment::Read1], "Y".repeat(151));
        assert_eq!(expanded[&ReadSegment::Index1], "I".repeat(8));
        assert_eq!(expanded[&ReadSegment::Read2], "N".repeat(151));
        assert_eq!(expanded.len(), 3);
    }

    #[test]
    fn test_expand_single_segment() {
        let expanded = expand("Y150").unwrap();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[&ReadSegment::Read1], "Y".repeat(150));
    }

    #[test]
    fn test_expand_four_segments_in_order() {
        let expanded = expand("Y151;I8;I8;Y151").unwrap();
        let slots: Vec<ReadSegment> = expanded.keys().copied().collect();
        assert_eq!(
            slots,
            vec![
                ReadSegment::Read1,
                ReadSegment::Index1,
                ReadSegment::Index2,
                ReadSegment::Read2,
            ]
        );
    }

    #[test]
    fn test_mixed_letters_within_a_segment() {
        let expanded = expand("U8N2Y141;I8;Y151").unwrap();
        let read1 = &expanded[&ReadSegment::Read1];
        assert_eq!(read1.len(), 151);
        assert!(read1.starts_with("UUUUUUUUNN"));
        assert!(read1.ends_with("YY"));
    }

    #[test]
    fn test_five_segments_rejected() {
        assert_eq!(
            expand("Y1;Y1;Y1;Y1;Y1"),
            Err(CycleError::TooManySegments("Y1;Y1;Y1;Y1;Y1".to_string()))
        );
    }

    #[test]
    fn test_empty_and_malformed_rejected() {
        assert!(matches!(expand(""), Err(CycleError::Unparseable(_))));
        assert!(matches!(expand("Y150;"), Err(CycleError::Unparseable(_))));
        assert!(matches!(expand("X10"), Err(CycleError::Unparseable(_))));
        assert!(matches!(expand("Y"), Err(CycleError::Unparseable(_))));
        assert!(matches!(expand("150Y"), Err(CycleError::Unparseable(_))));
    }

    proptest! {
        #[test]
        fn prop_expansion_length_is_digit_sum(
            segments in prop::collection::vec(
                prop::collection::vec(
                    (prop::sample::select(vec!['N', 'Y', 'I', 'U']), 1usize..300),
                    1..4,
                ),
                1..=4,
            )
        ) {
            let spec = segments
                .iter()
                .map(|tokens| {
                    tokens
                        .iter()
                        .map(|(letter, count)| format!("{}{}", letter, count))
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join(";");

            let expanded = expand(&spec).unwrap();
            let total: usize = expanded.values().map(String::len).sum();
            let expected: usize = segments.iter().flatten().map(|(_, count)| count).sum();
            prop_assert_eq!(total, expected);
        }
    }
}
