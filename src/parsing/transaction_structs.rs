// Definition of the data structures holding mempool candidates

use serde::Serialize;
use std::collections::HashMap;

// One mempool entry as read from a record line.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TxRecord {
    pub txid: String,
    pub fee: u64,
    // carried through, the builder does not enforce a block weight budget
    pub weight: u64,
    // None for a root transaction, otherwise a non-empty list in first-seen order
    pub parents: Option<Vec<String>>,
}

impl TxRecord {
    pub fn new(txid: impl Into<String>, fee: u64, weight: u64, parents: Option<Vec<String>>) -> Self {
        TxRecord {
            txid: txid.into(),
            fee,
            weight,
            parents: parents.filter(|p| !p.is_empty()),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_none()
    }

    // returns: iterator over the declared parent txids (empty for roots)
    pub fn parent_txids(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().flatten().map(String::as_str)
    }
}

// Mapping txid -> record that iterates in insertion order.
//
// Insertion order is the order of first appearance in the loaded input and is
// what makes fee ties resolve the same way on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    records: Vec<TxRecord>,
    index: HashMap<String, usize>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    // inserts the record if its txid is unknown
    // returns: false (and leaves the set untouched) if the txid is already present
    pub fn insert(&mut self, record: TxRecord) -> bool {
        if self.index.contains_key(&record.txid) {
            return false;
        }
        self.index.insert(record.txid.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, txid: &str) -> Option<&TxRecord> {
        self.index.get(txid).map(|&i| &self.records[i])
    }

    // returns: insertion position of txid, if present
    pub fn position(&self, txid: &str) -> Option<usize> {
        self.index.get(txid).copied()
    }

    pub fn contains(&self, txid: &str) -> bool {
        self.index.contains_key(txid)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // returns: all records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, TxRecord> {
        self.records.iter()
    }
}

impl FromIterator<TxRecord> for CandidateSet {
    // later records with an already seen txid are ignored
    fn from_iter<I: IntoIterator<Item = TxRecord>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a TxRecord;
    type IntoIter = std::slice::Iter<'a, TxRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
