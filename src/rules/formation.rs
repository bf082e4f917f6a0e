//! Formation parsing and position lists.
//!
//! A formation is a hyphen-separated list of outfield line sizes such as
//! `4-4-2` or `4-2-3-1`. The first line is the defence, the last the attack,
//! and every line in between counts towards midfield. Outfield lines must
//! total exactly 10 so that, with the goalkeeper, each side fields 11.

use serde::{Deserialize, Serialize};

use crate::core::error::{MatchError, Result};

/// Outfield players every formation must field.
pub const OUTFIELD_PLAYERS: u32 = 10;

/// Dash variants accepted in place of a plain hyphen.
const DASHES: [char; 4] = ['\u{2010}', '\u{2012}', '\u{2013}', '\u{2014}'];

/// A validated formation: defenders, summed midfield, forwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formation {
    pub defenders: u32,
    pub midfielders: u32,
    pub forwards: u32,
}

impl Formation {
    /// Parse a raw formation string. See [`parse_formation`].
    pub fn parse(raw: &str) -> Result<Self> {
        parse_formation(raw)
    }

    /// Position labels for this formation. See [`build_positions`].
    #[must_use]
    pub fn positions(&self) -> Vec<String> {
        build_positions(self)
    }

    /// Total slots including the goalkeeper.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        (1 + self.defenders + self.midfielders + self.forwards) as usize
    }
}

impl std::fmt::Display for Formation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.defenders, self.midfielders, self.forwards)
    }
}

/// Parse a formation string.
///
/// Dash variants are normalized to `-`, surrounding whitespace is ignored.
/// Fails when there are fewer than three lines, a line is not a positive
/// integer, or the lines do not total 10.
///
/// ```
/// use card_football::rules::parse_formation;
///
/// let formation = parse_formation("4-2-3-1").unwrap();
/// assert_eq!((formation.defenders, formation.midfielders, formation.forwards), (4, 5, 1));
/// assert!(parse_formation("4-4").is_err());
/// ```
pub fn parse_formation(raw: &str) -> Result<Formation> {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if DASHES.contains(&c) { '-' } else { c })
        .collect();

    let malformed = || MatchError::MalformedFormation {
        raw: raw.to_string(),
    };

    let lines = cleaned
        .split('-')
        .map(|part| part.trim().parse::<u32>().map_err(|_| malformed()))
        .collect::<Result<Vec<_>>>()?;

    if lines.len() < 3 {
        return Err(malformed());
    }
    if lines.iter().any(|&line| line == 0) {
        return Err(MatchError::NonPositiveLine {
            raw: raw.to_string(),
        });
    }

    let defenders = lines[0];
    let forwards = lines[lines.len() - 1];
    let midfielders = lines[1..lines.len() - 1]
        .iter()
        .fold(0u32, |sum, &line| sum.saturating_add(line));
    let total = defenders.saturating_add(midfielders).saturating_add(forwards);

    if total != OUTFIELD_PLAYERS {
        return Err(MatchError::InvalidTotal { total });
    }

    Ok(Formation {
        defenders,
        midfielders,
        forwards,
    })
}

/// Position labels: `GK`, then `DEF 1..d`, `MID 1..m`, `FWD 1..f`.
#[must_use]
pub fn build_positions(formation: &Formation) -> Vec<String> {
    let lines = [
        ("DEF", formation.defenders),
        ("MID", formation.midfielders),
        ("FWD", formation.forwards),
    ];

    std::iter::once("GK".to_string())
        .chain(
            lines
                .into_iter()
                .flat_map(|(prefix, count)| (1..=count).map(move |i| format!("{prefix} {i}"))),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_four_two() {
        let formation = parse_formation("4-4-2").unwrap();
        assert_eq!(formation.defenders, 4);
        assert_eq!(formation.midfielders, 4);
        assert_eq!(formation.forwards, 2);
        assert_eq!(formation.to_string(), "4-4-2");
    }

    #[test]
    fn test_parse_sums_middle_lines() {
        let formation = parse_formation("4-2-3-1").unwrap();
        assert_eq!(formation.midfielders, 5);

        let formation = parse_formation("3-1-2-1-3").unwrap();
        assert_eq!((formation.defenders, formation.midfielders, formation.forwards), (3, 4, 3));
    }

    #[test]
    fn test_parse_normalizes_dashes_and_whitespace() {
        assert!(parse_formation("  3–5–2 ").is_ok());
        assert!(parse_formation("3—5—2").is_ok());
        assert!(parse_formation("3 - 5 - 2").is_ok());
    }

    #[test]
    fn test_parse_too_few_lines() {
        assert!(matches!(
            parse_formation("5-5"),
            Err(MatchError::MalformedFormation { .. })
        ));
        assert!(matches!(
            parse_formation("10"),
            Err(MatchError::MalformedFormation { .. })
        ));
    }

    #[test]
    fn test_parse_non_integer() {
        for raw in ["4-x-2", "4-4.5-1", "", "4--4-2", "four-four-two"] {
            assert!(
                matches!(parse_formation(raw), Err(MatchError::MalformedFormation { .. })),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_zero_line() {
        assert!(matches!(
            parse_formation("5-0-5"),
            Err(MatchError::NonPositiveLine { .. })
        ));
    }

    #[test]
    fn test_parse_wrong_total() {
        assert_eq!(
            parse_formation("4-4-3"),
            Err(MatchError::InvalidTotal { total: 11 })
        );
        assert_eq!(
            parse_formation("3-3-3"),
            Err(MatchError::InvalidTotal { total: 9 })
        );
    }

    #[test]
    fn test_parse_huge_lines_do_not_overflow() {
        assert!(matches!(
            parse_formation("4294967295-4294967295-1"),
            Err(MatchError::InvalidTotal { .. })
        ));
    }

    #[test]
    fn test_build_positions() {
        let positions = build_positions(&parse_formation("4-4-2").unwrap());

        assert_eq!(
            positions,
            vec![
                "GK", "DEF 1", "DEF 2", "DEF 3", "DEF 4", "MID 1", "MID 2", "MID 3", "MID 4",
                "FWD 1", "FWD 2",
            ]
        );
    }

    #[test]
    fn test_slot_count() {
        let formation = parse_formation("3-4-3").unwrap();
        assert_eq!(formation.slot_count(), 11);
        assert_eq!(formation.positions().len(), formation.slot_count());
    }
}
