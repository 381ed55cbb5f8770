//! Candidate key search.
//!
//! Exhaustive: subsets of the universe are visited by ascending size, so the
//! first superkeys seen are minimal and any later subset that contains one of
//! them can be discarded without computing its closure. The search is
//! exponential in the size of the universe; that is inherent to enumerating
//! every candidate key.

use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::debug;

use crate::closure::{closure, is_superkey};
use crate::types::{AttributeSet, FdSet, KeySearch, SearchStats};

/// Every candidate key of the relation described by `fds`.
///
/// An empty dependency set has an empty universe and yields no keys.
pub fn find_candidate_keys(fds: &FdSet) -> BTreeSet<AttributeSet> {
    search_keys(fds).keys
}

/// Candidate key search that also reports how much work it did.
pub fn search_keys(fds: &FdSet) -> KeySearch {
    let universe = fds.universe();
    let attrs: Vec<&String> = universe.iter().collect();
    let mut keys: BTreeSet<AttributeSet> = BTreeSet::new();
    let mut stats = SearchStats::default();

    for size in 1..=attrs.len() {
        let found_before = keys.len();
        for combo in attrs.iter().copied().combinations(size) {
            stats.subsets_examined += 1;
            let candidate: AttributeSet = combo.into_iter().collect();

            if keys.iter().any(|key| key.is_subset(&candidate)) {
                stats.supersets_pruned += 1;
                continue;
            }

            stats.closures_computed += 1;
            if closure(fds, &candidate).is_superset(universe) {
                keys.insert(candidate);
            }
        }
        debug!(
            size,
            new_keys = keys.len() - found_before,
            total_keys = keys.len(),
            "searched subsets"
        );
    }

    KeySearch {
        universe: universe.clone(),
        keys,
        stats,
    }
}

/// `true` when `attrs` is a superkey and no proper subset of it is.
///
/// By monotonicity of closure it suffices to drop one attribute at a time.
pub fn is_candidate_key(fds: &FdSet, attrs: &AttributeSet) -> bool {
    if attrs.is_empty() || !is_superkey(fds, attrs) {
        return false;
    }
    attrs.iter().all(|attr| {
        let smaller: AttributeSet = attrs.iter().filter(|a| *a != attr).collect();
        !is_superkey(fds, &smaller)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fds;
    use crate::types::ParseOptions;

    fn set(attrs: &[&str]) -> AttributeSet {
        attrs.iter().copied().collect()
    }

    fn fds(raw: &[&str]) -> FdSet {
        parse_fds(raw, &ParseOptions::default()).dependencies
    }

    #[test]
    fn single_key_chain() {
        let keys = find_candidate_keys(&fds(&["A->B", "B->C", "C,D->E"]));
        assert_eq!(keys, BTreeSet::from([set(&["A", "D"])]));
    }

    #[test]
    fn several_keys_of_different_sizes() {
        // A <-> B, and B,C together determine D.
        let keys = find_candidate_keys(&fds(&["A->B", "B->A", "B,C->D", "D->C"]));
        assert_eq!(
            keys,
            BTreeSet::from([
                set(&["A", "C"]),
                set(&["A", "D"]),
                set(&["B", "C"]),
                set(&["B", "D"]),
            ])
        );
    }

    #[test]
    fn cyclic_dependencies_make_every_attribute_a_key() {
        let keys = find_candidate_keys(&fds(&["A->B", "B->C", "C->A"]));
        assert_eq!(
            keys,
            BTreeSet::from([set(&["A"]), set(&["B"]), set(&["C"])])
        );
    }

    #[test]
    fn empty_dependency_set_has_no_keys() {
        let search = search_keys(&FdSet::default());
        assert!(search.universe.is_empty());
        assert!(search.keys.is_empty());
        assert_eq!(search.stats, SearchStats::default());
    }

    #[test]
    fn supersets_of_keys_are_pruned() {
        let search = search_keys(&fds(&["A->B,C"]));
        assert_eq!(search.keys, BTreeSet::from([set(&["A"])]));
        // 7 non-empty subsets of {A,B,C}; those containing A (besides A itself) are pruned.
        assert_eq!(search.stats.subsets_examined, 7);
        assert_eq!(search.stats.supersets_pruned, 3);
        assert_eq!(search.stats.closures_computed, 4);
    }

    #[test]
    fn candidate_key_predicate() {
        let fds = fds(&["A->B", "B->C", "C,D->E"]);
        assert!(is_candidate_key(&fds, &set(&["A", "D"])));
        assert!(!is_candidate_key(&fds, &set(&["A", "B", "D"])));
        assert!(!is_candidate_key(&fds, &set(&["B", "D"])));
        assert!(!is_candidate_key(&fds, &AttributeSet::new()));
    }
}
