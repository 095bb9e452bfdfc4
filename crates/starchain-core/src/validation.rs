//! Chain integrity checks.
//!
//! Validation never short-circuits: every record gets an outcome and every
//! issue found on a record is listed, so a caller can see exactly where and
//! how a chain was altered.

use serde::Serialize;

use crate::error::ValidationError;
use crate::record::Record;
use crate::types::Fingerprint;

/// Check one record against its stored index and its predecessor.
///
/// Every record, genesis included, must sit at its claimed position and
/// carry a fingerprint matching its content. Genesis must have no link;
/// every other record must link to its predecessor's fingerprint.
pub fn validate_record(
    record: &Record,
    index: u64,
    previous: Option<&Record>,
) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    if record.position != index {
        issues.push(ValidationError::UnexpectedPosition {
            index,
            claimed: record.position,
        });
    }

    let expected = previous.and_then(|p| p.fingerprint);
    let linked = if index == 0 {
        record.previous_fingerprint.is_none()
    } else {
        record.previous_fingerprint.is_some() && record.previous_fingerprint == expected
    };
    if !linked {
        issues.push(ValidationError::BrokenLink {
            position: index,
            expected,
            got: record.previous_fingerprint,
        });
    }

    match record.fingerprint {
        None => issues.push(ValidationError::MissingFingerprint(index)),
        Some(stored) => {
            if !record.self_validate() {
                issues.push(ValidationError::FingerprintMismatch {
                    position: index,
                    stored,
                    computed: record.compute_fingerprint(),
                });
            }
        }
    }

    issues
}

/// The validation result for a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    pub position: u64,
    pub fingerprint: Option<Fingerprint>,
    #[serde(serialize_with = "serialize_issues")]
    pub issues: Vec<ValidationError>,
}

impl RecordOutcome {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

fn serialize_issues<S: serde::Serializer>(
    issues: &[ValidationError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(issues.iter().map(|i| i.to_string()))
}

/// Per-record outcomes for a whole chain, in position order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl ChainReport {
    /// Validate `records` as a chain, indexing them by slice position.
    pub fn check(records: &[Record]) -> Self {
        let outcomes = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let previous = i.checked_sub(1).and_then(|p| records.get(p));
                RecordOutcome {
                    position: i as u64,
                    fingerprint: record.fingerprint,
                    issues: validate_record(record, i as u64, previous),
                }
            })
            .collect();
        Self { outcomes }
    }

    /// True when every record validated.
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(RecordOutcome::is_valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_valid())
    }

    pub fn failed_positions(&self) -> Vec<u64> {
        self.failures().map(|o| o.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a correctly linked chain of `n` records (genesis included).
    fn linked_chain(n: usize) -> Vec<Record> {
        let mut records: Vec<Record> = Vec::with_capacity(n);
        for i in 0..n {
            let mut record = if i == 0 {
                Record::genesis().unwrap()
            } else {
                Record::new(&format!("entry {}", i)).unwrap()
            };
            record.position = i as u64;
            record.timestamp = 1_700_000_000 + i as i64;
            record.previous_fingerprint = records.last().and_then(|r| r.fingerprint);
            record.fingerprint = Some(record.compute_fingerprint());
            records.push(record);
        }
        records
    }

    #[test]
    fn test_linked_chain_is_valid() {
        let report = ChainReport::check(&linked_chain(5));
        assert_eq!(report.outcomes.len(), 5);
        assert!(report.is_valid());
        assert!(report.failed_positions().is_empty());
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(ChainReport::check(&[]).is_valid());
    }

    #[test]
    fn test_body_tamper_flags_only_that_record() {
        let mut records = linked_chain(5);
        records[2].body = crate::encoding::encode_body("forged").unwrap();

        let report = ChainReport::check(&records);
        assert_eq!(report.failed_positions(), vec![2]);
        assert!(matches!(
            report.outcomes[2].issues.as_slice(),
            [ValidationError::FingerprintMismatch { position: 2, .. }]
        ));
    }

    #[test]
    fn test_fingerprint_tamper_breaks_next_link() {
        let mut records = linked_chain(5);
        records[2].fingerprint = Some(Fingerprint::from_bytes([0xee; 32]));

        let report = ChainReport::check(&records);
        assert_eq!(report.failed_positions(), vec![2, 3]);
        assert!(matches!(
            report.outcomes[3].issues.as_slice(),
            [ValidationError::BrokenLink { position: 3, .. }]
        ));
    }

    #[test]
    fn test_rehashed_tamper_is_caught_by_link() {
        // A forger who recomputes the fingerprint still breaks the next link.
        let mut records = linked_chain(4);
        records[1].body = crate::encoding::encode_body("forged").unwrap();
        records[1].fingerprint = Some(records[1].compute_fingerprint());

        let report = ChainReport::check(&records);
        assert_eq!(report.failed_positions(), vec![2]);
    }

    #[test]
    fn test_position_tamper_reports_every_issue() {
        let mut records = linked_chain(3);
        records[1].position = 9;

        let issues = &ChainReport::check(&records).outcomes[1].issues;
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0],
            ValidationError::UnexpectedPosition { index: 1, claimed: 9 }
        ));
        assert!(matches!(issues[1], ValidationError::FingerprintMismatch { .. }));
    }

    #[test]
    fn test_missing_link_is_reported() {
        let mut records = linked_chain(2);
        records[1].previous_fingerprint = None;
        records[1].fingerprint = Some(records[1].compute_fingerprint());

        let issues = &ChainReport::check(&records).outcomes[1].issues;
        assert!(matches!(
            issues.as_slice(),
            [ValidationError::BrokenLink { got: None, .. }]
        ));
    }

    #[test]
    fn test_genesis_content_is_checked() {
        let mut records = linked_chain(3);
        records[0].body = crate::encoding::encode_body("forged").unwrap();

        let report = ChainReport::check(&records);
        assert_eq!(report.failed_positions(), vec![0]);
        assert!(matches!(
            report.outcomes[0].issues.as_slice(),
            [ValidationError::FingerprintMismatch { position: 0, .. }]
        ));

        let mut records = linked_chain(3);
        records[0].timestamp += 1;
        assert_eq!(ChainReport::check(&records).failed_positions(), vec![0]);
    }

    #[test]
    fn test_genesis_without_fingerprint_is_reported() {
        let mut records = linked_chain(1);
        records[0].fingerprint = None;
        assert!(matches!(
            ChainReport::check(&records).outcomes[0].issues.as_slice(),
            [ValidationError::MissingFingerprint(0)]
        ));
    }

    #[test]
    fn test_genesis_with_a_link_is_reported() {
        let mut records = linked_chain(1);
        records[0].previous_fingerprint = Some(Fingerprint::from_bytes([0x11; 32]));
        records[0].fingerprint = Some(records[0].compute_fingerprint());
        assert!(matches!(
            ChainReport::check(&records).outcomes[0].issues.as_slice(),
            [ValidationError::BrokenLink { position: 0, expected: None, .. }]
        ));
    }
}
