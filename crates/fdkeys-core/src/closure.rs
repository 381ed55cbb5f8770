use tracing::trace;

use crate::types::{AttributeSet, FdSet};

/// Compute the closure of `attrs` under `fds`.
///
/// Fixed-point iteration: every pass applies each dependency whose left-hand
/// side is already contained in the result, and the loop stops after a pass
/// that adds nothing. Each productive pass adds at least one attribute, so
/// there are at most `|universe| + 1` passes.
pub fn closure(fds: &FdSet, attrs: &AttributeSet) -> AttributeSet {
    let mut result = attrs.clone();
    let mut passes = 0usize;
    let mut changed = true;

    while changed {
        changed = false;
        passes += 1;
        for fd in fds {
            if fd.lhs.is_subset(&result) {
                for attr in &fd.rhs {
                    if !result.contains(attr) {
                        result.insert(attr.clone());
                        changed = true;
                    }
                }
            }
        }
    }

    trace!(input = %attrs, closure = %result, passes, "computed closure");
    result
}

/// `true` when `attrs` determines every attribute of the universe.
pub fn is_superkey(fds: &FdSet, attrs: &AttributeSet) -> bool {
    closure(fds, attrs).is_superset(fds.universe())
}
