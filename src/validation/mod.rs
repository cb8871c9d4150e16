mod unreachable;

pub use self::unreachable::{find_unreachable, Unreachable, UnreachableReason};

use crate::parsing::transaction_structs::CandidateSet;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String), // String = reason
}

// checks a sequence of txids produced by the selection loop: every txid must be
// known, appear only once and come after all of its parents.
// returns: ValidationResult with the first violation found
pub fn check_block(candidates: &CandidateSet, txids: &[String]) -> ValidationResult {
    let mut seen: HashSet<&str> = HashSet::with_capacity(txids.len());

    for txid in txids {
        let Some(tx) = candidates.get(txid) else {
            return ValidationResult::Invalid(format!("unknown txid {txid}"));
        };
        if let Some(parent) = tx.parent_txids().find(|p| !seen.contains(p)) {
            return ValidationResult::Invalid(format!("{txid} precedes its parent {parent}"));
        }
        if !seen.insert(txid.as_str()) {
            return ValidationResult::Invalid(format!("duplicate txid {txid}"));
        }
    }
    ValidationResult::Valid
}
