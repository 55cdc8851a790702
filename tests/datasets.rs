// Dataset invariants for the bundled word list (www/words.json).
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use frog_crossing::Catalog;

const BUNDLED: &str = include_str!("../www/words.json");

#[test]
fn bundled_catalog_parses() {
    let catalog = Catalog::from_json(BUNDLED).expect("bundled words.json must parse");
    assert!(!catalog.units().is_empty());
    for unit in catalog.units() {
        assert!(!unit.words.is_empty(), "unit {} has no words", unit.unit);
    }
}

#[test]
fn translations_are_unique_per_unit() {
    let catalog = Catalog::from_json(BUNDLED).unwrap();
    for unit in catalog.units() {
        let mut seen = HashSet::new();
        for w in &unit.words {
            assert!(!w.english.trim().is_empty(), "empty english in unit {}", unit.unit);
            assert!(!w.chinese.trim().is_empty(), "empty translation for '{}'", w.english);
            assert!(seen.insert(w.chinese.as_str()), "duplicate translation '{}' in unit {}", w.chinese, unit.unit);
        }
    }
}

#[test]
fn every_unit_fills_four_options() {
    let catalog = Catalog::from_json(BUNDLED).unwrap();
    for unit in catalog.units() {
        assert!(unit.words.len() >= frog_crossing::OPTION_COUNT, "unit {} too small for a full round", unit.unit);
    }
}
