//! Formation parser and position list tests.

use card_football::rules::{build_positions, parse_formation, Formation};
use card_football::MatchError;

/// Common shapes parse with the middle lines summed into midfield.
#[test]
fn test_common_formations() {
    let cases = [
        ("4-4-2", (4, 4, 2)),
        ("4-3-3", (4, 3, 3)),
        ("3-5-2", (3, 5, 2)),
        ("4-2-3-1", (4, 5, 1)),
        ("3-4-1-2", (3, 5, 2)),
        ("5-3-2", (5, 3, 2)),
        ("4-1-2-1-2", (4, 4, 2)),
    ];

    for (raw, (d, m, f)) in cases {
        let formation = parse_formation(raw).unwrap_or_else(|e| panic!("{raw}: {e}"));
        assert_eq!(
            (formation.defenders, formation.midfielders, formation.forwards),
            (d, m, f),
            "{raw}"
        );
        assert_eq!(formation.slot_count(), 11);
    }
}

/// Typographic dashes and stray whitespace are tolerated.
#[test]
fn test_dash_variants_and_whitespace() {
    let expected = Formation {
        defenders: 4,
        midfielders: 4,
        forwards: 2,
    };

    for raw in ["4\u{2013}4\u{2013}2", "4\u{2014}4\u{2014}2", "4\u{2010}4-2", " 4 - 4 - 2 "] {
        assert_eq!(parse_formation(raw).unwrap(), expected, "{raw:?}");
    }
}

/// Fewer than three lines or non-numeric lines are malformed.
#[test]
fn test_malformed_formations() {
    for raw in ["", "4-4", "442", "4-four-2", "4--4-2", "-4-4-2", "4-4-2-", "4.5-3.5-2", "-1-9-2"] {
        let err = parse_formation(raw).unwrap_err();
        assert!(
            matches!(err, MatchError::MalformedFormation { .. }),
            "{raw:?} gave {err:?}"
        );
        assert!(err.is_validation());
    }
}

/// A zero-sized line is rejected with its own message.
#[test]
fn test_zero_line_rejected() {
    let err = parse_formation("4-0-6").unwrap_err();

    assert_eq!(
        err,
        MatchError::NonPositiveLine {
            raw: "4-0-6".to_string()
        }
    );
    assert!(err.to_string().starts_with("Each line in the formation must be greater than 0"));
}

/// Outfield totals other than 10 report the total.
#[test]
fn test_wrong_totals() {
    assert_eq!(
        parse_formation("4-4-3").unwrap_err(),
        MatchError::InvalidTotal { total: 11 }
    );
    assert_eq!(
        parse_formation("3-3-3").unwrap_err(),
        MatchError::InvalidTotal { total: 9 }
    );
    assert_eq!(
        parse_formation("4-2-2-1").unwrap_err(),
        MatchError::InvalidTotal { total: 9 }
    );
}

/// Position labels run GK, defenders, midfielders, forwards.
#[test]
fn test_positions_for_four_two_three_one() {
    let positions = build_positions(&parse_formation("4-2-3-1").unwrap());

    assert_eq!(
        positions,
        vec![
            "GK", "DEF 1", "DEF 2", "DEF 3", "DEF 4", "MID 1", "MID 2", "MID 3", "MID 4", "MID 5",
            "FWD 1",
        ]
    );
}

/// Formation display uses the summed midfield.
#[test]
fn test_display_collapses_midfield() {
    let formation = Formation::parse("3-4-1-2").unwrap();
    assert_eq!(formation.to_string(), "3-5-2");
    assert_eq!(formation.positions().len(), 11);
}
