use crate::parsing::transaction_structs::{CandidateSet, TxRecord};
use std::collections::HashSet;
use tracing::trace;

// a candidate is eligible if it is not yet included and all its parents are
fn is_eligible(tx: &TxRecord, included: &HashSet<&str>) -> bool {
    !included.contains(tx.txid.as_str()) && tx.parent_txids().all(|p| included.contains(p))
}

// scans the candidates in insertion order for the eligible one with the highest fee
// on equal fees the first scanned candidate is kept
// returns: None if no candidate is eligible
fn highest_fee_eligible<'a>(
    candidates: &'a CandidateSet,
    included: &HashSet<&str>,
) -> Option<&'a TxRecord> {
    let mut best: Option<&TxRecord> = None;

    for tx in candidates {
        if !is_eligible(tx, included) {
            continue;
        }
        if best.map_or(true, |b| tx.fee > b.fee) {
            best = Some(tx);
        }
    }
    best
}

// greedy selection loop: repeatedly includes the highest fee transaction whose parents
// are already included until nothing is eligible anymore. Candidates with missing
// parents or cyclic dependencies are never selected.
// returns: Vec of txids in selection order, every parent precedes its children
pub fn select_transactions(candidates: &CandidateSet) -> Vec<String> {
    let mut included: Vec<String> = Vec::with_capacity(candidates.len());
    let mut included_set: HashSet<&str> = HashSet::with_capacity(candidates.len());

    while let Some(tx) = highest_fee_eligible(candidates, &included_set) {
        trace!(round = included.len() + 1, txid = %tx.txid, fee = tx.fee, "selected");
        included_set.insert(tx.txid.as_str());
        included.push(tx.txid.clone());
    }
    included
}
