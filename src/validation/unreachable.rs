use crate::parsing::transaction_structs::CandidateSet;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnreachableReason {
    /// A declared parent is not in the candidate set.
    MissingParent { parent: String },
    /// A parent is itself unreachable.
    UnreachableParent { parent: String },
    /// Part of (or blocked only by) a dependency cycle.
    DependencyCycle,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Unreachable {
    pub txid: String,
    #[serde(flatten)]
    pub reason: UnreachableReason,
}

impl fmt::Display for Unreachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            UnreachableReason::MissingParent { parent } => {
                write!(f, "{}: parent {} is not in the mempool", self.txid, parent)
            }
            UnreachableReason::UnreachableParent { parent } => {
                write!(f, "{}: parent {} is unreachable", self.txid, parent)
            }
            UnreachableReason::DependencyCycle => {
                write!(f, "{}: dependency cycle", self.txid)
            }
        }
    }
}

// explains why candidates missing from the selection could never become eligible.
// Missing parents are found directly, then propagated to descendants until nothing
// changes anymore. Whatever is still unexplained can only be blocked by a cycle.
// returns: one Unreachable per unselected candidate, in insertion order
pub fn find_unreachable(candidates: &CandidateSet, selected: &[String]) -> Vec<Unreachable> {
    let selected: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let mut reasons: HashMap<&str, UnreachableReason> = HashMap::new();

    for tx in candidates {
        if let Some(parent) = tx.parent_txids().find(|p| !candidates.contains(p)) {
            reasons.insert(
                tx.txid.as_str(),
                UnreachableReason::MissingParent {
                    parent: parent.to_string(),
                },
            );
        }
    }

    let mut nothing_changed = false;
    while !nothing_changed {
        nothing_changed = true;

        for tx in candidates {
            if reasons.contains_key(tx.txid.as_str()) {
                continue;
            }
            if let Some(parent) = tx.parent_txids().find(|p| reasons.contains_key(p)) {
                reasons.insert(
                    tx.txid.as_str(),
                    UnreachableReason::UnreachableParent {
                        parent: parent.to_string(),
                    },
                );
                nothing_changed = false;
            }
        }
    }

    candidates
        .iter()
        .filter(|tx| !selected.contains(tx.txid.as_str()))
        .map(|tx| Unreachable {
            txid: tx.txid.clone(),
            reason: reasons
                .remove(tx.txid.as_str())
                .unwrap_or(UnreachableReason::DependencyCycle),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mining::select_transactions;
    use crate::parsing::transaction_structs::TxRecord;

    fn tx(txid: &str, parents: &[&str]) -> TxRecord {
        let parents = parents.iter().map(|p| p.to_string()).collect();
        TxRecord::new(txid, 1, 1, Some(parents))
    }

    fn unreachable(set: &CandidateSet) -> Vec<Unreachable> {
        find_unreachable(set, &select_transactions(set))
    }

    #[test]
    fn everything_selected() {
        let set: CandidateSet = [tx("a", &[]), tx("b", &["a"])].into_iter().collect();
        assert!(unreachable(&set).is_empty());
    }

    #[test]
    fn missing_parent_and_descendants() {
        let set: CandidateSet = [tx("grandchild", &["child"]), tx("child", &["ghost"])]
            .into_iter()
            .collect();
        assert_eq!(
            unreachable(&set),
            vec![
                Unreachable {
                    txid: "grandchild".to_string(),
                    reason: UnreachableReason::UnreachableParent {
                        parent: "child".to_string()
                    },
                },
                Unreachable {
                    txid: "child".to_string(),
                    reason: UnreachableReason::MissingParent {
                        parent: "ghost".to_string()
                    },
                },
            ]
        );
    }

    #[test]
    fn cycle_and_its_dependents() {
        let set: CandidateSet = [tx("a", &["b"]), tx("b", &["a"]), tx("c", &["a"]), tx("d", &[])]
            .into_iter()
            .collect();
        let reasons: Vec<(String, UnreachableReason)> = unreachable(&set)
            .into_iter()
            .map(|u| (u.txid, u.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ("a".to_string(), UnreachableReason::DependencyCycle),
                ("b".to_string(), UnreachableReason::DependencyCycle),
                ("c".to_string(), UnreachableReason::DependencyCycle),
            ]
        );
    }

    #[test]
    fn display_names_parent() {
        let entry = Unreachable {
            txid: "b".to_string(),
            reason: UnreachableReason::MissingParent {
                parent: "a".to_string(),
            },
        };
        assert_eq!(entry.to_string(), "b: parent a is not in the mempool");
    }
}
