//! Functional dependency toolkit: parse `LHS->RHS` dependencies, compute
//! attribute closures and enumerate every candidate key of a relation.

pub mod catalogs;
pub mod closure;
pub mod error;
pub mod ffi;
pub mod keys;
pub mod parser;
pub mod types;

pub use catalogs::{REPORT_VERSION, SAMPLE_DEPENDENCIES};
pub use closure::{closure, is_superkey};
pub use error::{FdError, Result};
pub use ffi::{check_to_json, closure_to_json, find_keys_to_json, ClosureReport, KeysReport};
pub use keys::{find_candidate_keys, is_candidate_key, search_keys};
pub use parser::{parse_attribute_list, parse_fds, parse_source};
pub use types::*;
