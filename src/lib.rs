//! Dependency-aware greedy block building over a mempool of fee-paying
//! transactions.
//!
//! The [`parsing`] module turns `txid,fee,weight[,parents...]` records into an
//! insertion-ordered [`CandidateSet`]. [`build_block`] then repeatedly picks the
//! highest fee transaction whose parents are already included and finally
//! applies the configured [`RootFilter`].

pub mod config;
pub mod error;
pub mod mining;
pub mod parsing;
pub mod validation;

pub use config::{BuildConfig, Config, DuplicatePolicy, LoaderConfig, ParentEncoding, RootFilter};
pub use error::{ConfigError, LoadError, ParseError};
pub use mining::{build_block, select_transactions, Block};
pub use parsing::transaction_structs::{CandidateSet, TxRecord};
pub use parsing::{load_candidates_from_file, parse_candidates};
pub use validation::{check_block, find_unreachable, Unreachable, ValidationResult};
