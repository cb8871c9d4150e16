pub mod record;
pub mod transaction_structs;

use self::record::parse_record;
use self::transaction_structs::CandidateSet;
use crate::config::{DuplicatePolicy, LoaderConfig};
use crate::error::{LoadError, LoadResult};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

// parses record lines into a CandidateSet ordered by first appearance
// returns: the first ParseError or DuplicateKey error encountered, never a partial set
pub fn parse_candidates<I, S>(lines: I, config: &LoaderConfig) -> LoadResult<CandidateSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates = CandidateSet::new();
    // source line of each inserted record, indexed by candidate position
    let mut lines_by_position: Vec<usize> = Vec::new();

    for (index, content) in lines.into_iter().enumerate() {
        let line = index + 1;
        let Some(record) = parse_record(line, content.as_ref(), config.parent_encoding)? else {
            continue;
        };

        if let Some(position) = candidates.position(&record.txid) {
            let first_line = lines_by_position[position];
            match config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(LoadError::DuplicateKey {
                        txid: record.txid,
                        line,
                        first_line,
                    });
                }
                DuplicatePolicy::KeepFirst => {
                    warn!(txid = %record.txid, line, first_line, "ignoring duplicate txid");
                    continue;
                }
            }
        }
        lines_by_position.push(line);
        candidates.insert(record);
    }

    debug!(candidates = candidates.len(), "parsed mempool records");
    Ok(candidates)
}

// reads the mempool file at path and parses it with parse_candidates
pub fn load_candidates_from_file<P: AsRef<Path>>(
    path: P,
    config: &LoaderConfig,
) -> LoadResult<CandidateSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_candidates(content.lines(), config)
}
