// Catalog invariant tests. These are native-friendly and avoid wasm/browser
// APIs.

use std::collections::HashSet;

use snack_drop::FOOD_KINDS;
use snack_drop::game::sim::TIME_MAX;

#[test]
fn catalog_has_six_kinds() {
    assert_eq!(FOOD_KINDS.len(), 6);
}

#[test]
fn catalog_labels_are_unique_and_nonempty() {
    let mut seen = HashSet::new();
    for kind in FOOD_KINDS {
        assert!(!kind.label.is_empty(), "empty label in catalog");
        assert!(seen.insert(kind.label), "duplicate label '{}' in catalog", kind.label);
    }
}

#[test]
fn catalog_colors_are_hex_and_unique() {
    let mut seen = HashSet::new();
    for kind in FOOD_KINDS {
        let c = kind.color;
        assert!(seen.insert(c), "duplicate color '{}' in catalog", c);
        assert_eq!(c.len(), 7, "color '{}' for '{}' is not #RRGGBB", c, kind.label);
        assert!(c.starts_with('#'), "color '{}' for '{}' missing '#'", c, kind.label);
        assert!(
            c[1..].chars().all(|ch| ch.is_ascii_hexdigit()),
            "invalid hex digit in color '{}' for '{}'",
            c,
            kind.label
        );
    }
}

#[test]
fn catalog_time_gains_are_positive_and_within_the_clock() {
    for kind in FOOD_KINDS {
        assert!(kind.time_gain > 0.0, "non-positive gain for '{}'", kind.label);
        assert!(
            kind.time_gain <= TIME_MAX,
            "gain for '{}' exceeds the full clock",
            kind.label
        );
    }
}
