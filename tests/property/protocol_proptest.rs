//! Property-based tests for hub record framing

use cloudboard::backend::hub::protocol::{split_records, RECORD_SEPARATOR};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_records_split_back_apart(records in proptest::collection::vec("\\{[a-z0-9:\" ]{0,30}\\}", 1..8)) {
        let mut framed = String::new();
        for record in &records {
            framed.push_str(record);
            framed.push(RECORD_SEPARATOR);
        }
        let split: Vec<&str> = split_records(&framed).collect();
        prop_assert_eq!(split, records.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
