mod transaction_selection;

pub use self::transaction_selection::select_transactions;

use crate::config::{BuildConfig, RootFilter};
use crate::parsing::transaction_structs::CandidateSet;
use serde::Serialize;
use tracing::debug;

// Result of one build run.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    // Final block after the root filter.
    pub txids: Vec<String>,
    // Full greedy selection before filtering; `txids` is a subsequence of it.
    #[serde(skip)]
    pub selected: Vec<String>,
    pub total_fee: u64,
    pub total_weight: u64,
}

impl Block {
    pub fn len(&self) -> usize {
        self.txids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txids.is_empty()
    }
}

// applies the post-selection filter to the greedy selection, keeping its order
// returns: filtered Vec of txids
pub fn apply_root_filter(
    candidates: &CandidateSet,
    selected: &[String],
    root_filter: RootFilter,
) -> Vec<String> {
    selected
        .iter()
        .filter(|txid| match root_filter {
            RootFilter::KeepAll => true,
            RootFilter::DropRoots => candidates.get(txid).is_some_and(|tx| !tx.is_root()),
        })
        .cloned()
        .collect()
}

// main building function. Runs the greedy selection over the candidates and
// filters the result according to config. Pure, the candidates are only read.
// returns: Block with the final txids plus the unfiltered selection
pub fn build_block(candidates: &CandidateSet, config: &BuildConfig) -> Block {
    let selected = select_transactions(candidates);
    let txids = apply_root_filter(candidates, &selected, config.root_filter);

    let (total_fee, total_weight) = txids
        .iter()
        .filter_map(|txid| candidates.get(txid))
        .fold((0u64, 0u64), |(fee, weight), tx| {
            (fee.saturating_add(tx.fee), weight.saturating_add(tx.weight))
        });

    debug!(
        candidates = candidates.len(),
        selected = selected.len(),
        included = txids.len(),
        total_fee,
        root_filter = %config.root_filter,
        "built block"
    );

    Block {
        txids,
        selected,
        total_fee,
        total_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::transaction_structs::TxRecord;

    fn abc() -> CandidateSet {
        [
            TxRecord::new("A", 10, 100, None),
            TxRecord::new("B", 20, 300, Some(vec!["A".to_string()])),
            TxRecord::new("C", 5, 100, None),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn roots_are_dropped_by_default() {
        let block = build_block(&abc(), &BuildConfig::default());
        assert_eq!(block.selected, vec!["A", "B", "C"]);
        assert_eq!(block.txids, vec!["B"]);
        assert_eq!(block.total_fee, 20);
        assert_eq!(block.total_weight, 300);
    }

    #[test]
    fn keep_all_returns_full_selection() {
        let config = BuildConfig {
            root_filter: RootFilter::KeepAll,
        };
        let block = build_block(&abc(), &config);
        assert_eq!(block.txids, block.selected);
        assert_eq!(block.total_fee, 35);
        assert_eq!(block.len(), 3);
    }

    #[test]
    fn empty_candidates_give_empty_block() {
        let block = build_block(&CandidateSet::new(), &BuildConfig::default());
        assert!(block.is_empty());
        assert_eq!(block, Block::default());
    }

    #[test]
    fn json_output_omits_selection() {
        let block = build_block(&abc(), &BuildConfig::default());
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["txids"], serde_json::json!(["B"]));
        assert!(json.get("selected").is_none());
    }
}
