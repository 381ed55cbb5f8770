use std::collections::BTreeSet;

use fdkeys_core::{
    closure, find_candidate_keys, is_superkey, parse_fds, AttributeSet, FdSet, ParseOptions,
};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn set(attrs: &[&str]) -> AttributeSet {
    attrs.iter().copied().collect()
}

fn fds(raw: &[&str]) -> FdSet {
    parse_fds(raw, &ParseOptions::default()).dependencies
}

fn compact(raw: &[&str]) -> FdSet {
    let opts = ParseOptions {
        compact: true,
        ..ParseOptions::default()
    };
    parse_fds(raw, &opts).dependencies
}

/// Every subset of the universe, smallest first.
fn power_set(universe: &AttributeSet) -> Vec<AttributeSet> {
    let attrs: Vec<&String> = universe.iter().collect();
    let mut subsets: Vec<AttributeSet> = (0u32..(1 << attrs.len()))
        .map(|mask| {
            attrs
                .iter()
                .enumerate()
                .filter(|(i, _)| (mask & (1 << i)) != 0)
                .map(|(_, a)| (*a).clone())
                .collect()
        })
        .collect();
    subsets.sort_by_key(|s| s.len());
    subsets
}

/// Minimal superkeys computed the slow way, as an oracle.
fn brute_force_keys(fds: &FdSet) -> BTreeSet<AttributeSet> {
    let superkeys: Vec<AttributeSet> = power_set(fds.universe())
        .into_iter()
        .filter(|s| !s.is_empty() && is_superkey(fds, s))
        .collect();
    superkeys
        .iter()
        .filter(|k| !superkeys.iter().any(|o| o != *k && o.is_subset(k)))
        .cloned()
        .collect()
}

const FIXTURES: &[&[&str]] = &[
    &["A->B", "B->C", "C,D->E"],
    &["A->B", "B->A", "B,C->D", "D->C"],
    &["A->B", "B->C", "C->A"],
    &["A,B->C", "C->D", "D->A"],
    &["emp->name,dept", "dept->manager", "manager,project->budget"],
    &["A->A"],
    &["A->B", "C->D", "E->F"],
];

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn scenario_chain_with_composite_determinant() {
    let fds = fds(&["A->B", "B->C", "C,D->E"]);
    assert_eq!(fds.universe(), &set(&["A", "B", "C", "D", "E"]));
    assert_eq!(closure(&fds, &set(&["A"])), set(&["A", "B", "C"]));
    assert_eq!(closure(&fds, &set(&["B", "D"])), set(&["B", "C", "D", "E"]));
    assert_eq!(
        find_candidate_keys(&fds),
        BTreeSet::from([set(&["A", "D"])])
    );
}

#[test]
fn scenario_chain_in_compact_notation() {
    assert_eq!(
        find_candidate_keys(&compact(&["A->B", "B->C", "CD->E"])),
        BTreeSet::from([set(&["A", "D"])])
    );
}

#[test]
fn scenario_chain_with_multi_character_token() {
    // Without compact notation `CD` is a single attribute.
    let fds = fds(&["A->B", "B->C", "CD->E"]);
    assert_eq!(fds.universe(), &set(&["A", "B", "C", "CD", "E"]));
    assert_eq!(
        find_candidate_keys(&fds),
        BTreeSet::from([set(&["A", "CD"])])
    );
}

#[test]
fn scenario_empty_dependency_set() {
    let parsed = parse_fds(Vec::<&str>::new(), &ParseOptions::default());
    assert!(parsed.dependencies.universe().is_empty());
    assert!(find_candidate_keys(&parsed.dependencies).is_empty());
}

#[test]
fn scenario_self_determination() {
    let fds = fds(&["A->A"]);
    assert_eq!(closure(&fds, &set(&["A"])), set(&["A"]));
    assert_eq!(fds.universe(), &set(&["A"]));
    assert_eq!(find_candidate_keys(&fds), BTreeSet::from([set(&["A"])]));
}

#[test]
fn scenario_duplicate_dependencies() {
    let once = fds(&["A->B"]);
    let twice = fds(&["A->B", "A->B"]);
    assert_eq!(once, twice);
    assert_eq!(find_candidate_keys(&once), find_candidate_keys(&twice));
}

#[test]
fn scenario_malformed_entry_is_ignored() {
    let clean = fds(&["A->B", "B->C", "C,D->E"]);
    let parsed = parse_fds(["A->B", "AB", "B->C", "C,D->E"], &ParseOptions::default());
    assert_eq!(parsed.diagnostics.len(), 1);
    assert_eq!(parsed.dependencies.universe(), clean.universe());
    assert_eq!(
        find_candidate_keys(&parsed.dependencies),
        find_candidate_keys(&clean)
    );
}

#[test]
fn scenario_empty_lhs_does_not_corrupt_keys() {
    let parsed = parse_fds(["A->B", "->C"], &ParseOptions::default());
    assert!(parsed.has_errors());
    assert_eq!(
        find_candidate_keys(&parsed.dependencies),
        BTreeSet::from([set(&["A"])])
    );
}

// ===========================================================================
// Closure properties
// ===========================================================================

#[test]
fn closure_is_extensive() {
    for raw in FIXTURES {
        let fds = fds(raw);
        for x in power_set(fds.universe()) {
            assert!(x.is_subset(&closure(&fds, &x)), "{raw:?} {x}");
        }
    }
}

#[test]
fn closure_is_idempotent() {
    for raw in FIXTURES {
        let fds = fds(raw);
        for x in power_set(fds.universe()) {
            let once = closure(&fds, &x);
            assert_eq!(closure(&fds, &once), once, "{raw:?} {x}");
        }
    }
}

#[test]
fn closure_is_monotone() {
    for raw in FIXTURES {
        let fds = fds(raw);
        let subsets = power_set(fds.universe());
        for x in &subsets {
            for y in subsets.iter().filter(|y| x.is_subset(y)) {
                assert!(
                    closure(&fds, x).is_subset(&closure(&fds, y)),
                    "{raw:?} {x} {y}"
                );
            }
        }
    }
}

// ===========================================================================
// Key properties
// ===========================================================================

#[test]
fn keys_match_brute_force_oracle() {
    for raw in FIXTURES {
        let fds = fds(raw);
        assert_eq!(find_candidate_keys(&fds), brute_force_keys(&fds), "{raw:?}");
    }
}

#[test]
fn keys_are_minimal_superkeys() {
    for raw in FIXTURES {
        let fds = fds(raw);
        for key in find_candidate_keys(&fds) {
            assert!(is_superkey(&fds, &key), "{raw:?} {key}");
            for attr in &key {
                let smaller: AttributeSet = key.iter().filter(|a| *a != attr).collect();
                assert!(!is_superkey(&fds, &smaller), "{raw:?} {key} not minimal");
            }
        }
    }
}

#[test]
fn independent_dependencies_need_every_determinant() {
    let keys = find_candidate_keys(&fds(&["A->B", "C->D", "E->F"]));
    assert_eq!(keys, BTreeSet::from([set(&["A", "C", "E"])]));
}
