use super::transaction_structs::TxRecord;
use crate::config::ParentEncoding;
use crate::error::ParseError;

pub const FIELD_DELIMITER: char = ',';
pub const PARENT_DELIMITER: char = ';';

// parses a trimmed numeric field as u64
// returns: ParseError::InvalidNumber naming the field on failure
fn parse_number(line: usize, field: &'static str, value: &str) -> Result<u64, ParseError> {
    value.parse::<u64>().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

// collects the parent txids following the weight field according to the encoding
// empty entries are skipped and repeated txids collapsed, first occurrence wins
fn collect_parents(
    line: usize,
    trailing: &[&str],
    encoding: ParentEncoding,
) -> Result<Option<Vec<String>>, ParseError> {
    let candidates: Vec<&str> = match encoding {
        ParentEncoding::TrailingFields => trailing.to_vec(),
        ParentEncoding::SubDelimited => {
            if trailing.len() > 1 {
                return Err(ParseError::TooManyFields {
                    line,
                    found: trailing.len() + 3,
                });
            }
            trailing
                .iter()
                .flat_map(|field| field.split(PARENT_DELIMITER))
                .collect()
        }
        ParentEncoding::FirstFieldOnly => trailing.iter().take(1).copied().collect(),
    };

    let mut parents: Vec<String> = Vec::new();
    for parent in candidates.into_iter().map(str::trim) {
        if !parent.is_empty() && !parents.iter().any(|p| p == parent) {
            parents.push(parent.to_string());
        }
    }
    Ok((!parents.is_empty()).then_some(parents))
}

// parses one record line of the form txid,fee,weight[,parents...]
// line is the 1-based line number used in errors
// returns: Ok(None) for blank lines, Ok(Some(TxRecord)) otherwise
pub fn parse_record(
    line: usize,
    content: &str,
    encoding: ParentEncoding,
) -> Result<Option<TxRecord>, ParseError> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = content.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() < 3 {
        return Err(ParseError::MissingField {
            line,
            found: fields.len(),
        });
    }

    let txid = fields[0];
    if txid.is_empty() {
        return Err(ParseError::EmptyTxid { line });
    }
    let fee = parse_number(line, "fee", fields[1])?;
    let weight = parse_number(line, "weight", fields[2])?;
    let parents = collect_parents(line, &fields[3..], encoding)?;

    Ok(Some(TxRecord::new(txid, fee, weight, parents)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str, encoding: ParentEncoding) -> Result<Option<TxRecord>, ParseError> {
        parse_record(1, content, encoding)
    }

    #[test]
    fn blank_line_is_skipped() {
        assert_eq!(parse("   \r", ParentEncoding::TrailingFields), Ok(None));
    }

    #[test]
    fn root_record() {
        let tx = parse("abc,1000,400", ParentEncoding::TrailingFields)
            .unwrap()
            .unwrap();
        assert_eq!(tx, TxRecord::new("abc", 1000, 400, None));
    }

    #[test]
    fn trailing_fields_are_all_parents() {
        let tx = parse("c,5,100,a,b", ParentEncoding::TrailingFields)
            .unwrap()
            .unwrap();
        assert_eq!(tx.parents, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn sub_delimited_parents() {
        let tx = parse("c,5,100,a;b;a", ParentEncoding::SubDelimited)
            .unwrap()
            .unwrap();
        assert_eq!(tx.parents, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn sub_delimited_rejects_extra_fields() {
        assert_eq!(
            parse("c,5,100,a,b", ParentEncoding::SubDelimited),
            Err(ParseError::TooManyFields { line: 1, found: 5 })
        );
    }

    #[test]
    fn first_field_only_truncates_parents() {
        let tx = parse("c,5,100,a,b", ParentEncoding::FirstFieldOnly)
            .unwrap()
            .unwrap();
        assert_eq!(tx.parents, Some(vec!["a".to_string()]));
    }

    #[test]
    fn empty_trailing_field_means_root() {
        let tx = parse("c,5,100,", ParentEncoding::TrailingFields)
            .unwrap()
            .unwrap();
        assert!(tx.is_root());
    }

    #[test]
    fn non_numeric_fee_is_reported() {
        let err = parse_record(7, "c,abc,100", ParentEncoding::TrailingFields).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                line: 7,
                field: "fee",
                value: "abc".to_string()
            }
        );
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = parse("c,1,-4", ParentEncoding::TrailingFields).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "weight", .. }));
    }

    #[test]
    fn too_few_fields() {
        assert_eq!(
            parse("c,1", ParentEncoding::TrailingFields),
            Err(ParseError::MissingField { line: 1, found: 2 })
        );
    }

    #[test]
    fn empty_txid() {
        assert_eq!(
            parse(",1,2", ParentEncoding::TrailingFields),
            Err(ParseError::EmptyTxid { line: 1 })
        );
    }
}
