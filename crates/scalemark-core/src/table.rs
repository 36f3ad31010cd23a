//! Calibration tables: immutable raw-to-scaled mappings.

use serde::{Deserialize, Serialize};

use crate::error::TableInvalid;
use crate::validate::audit_table;

/// Bounds of one section's calibration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Highest raw score the section can produce; the domain is `[0, max_raw]`.
    pub max_raw: i32,
    pub min_scaled: i32,
    pub max_scaled: i32,
}

/// An audited mapping from raw scores to scaled scores.
///
/// Construction runs the full audit and rejects bad data with every issue
/// found. Once built, the table is total over `[0, max_raw]`, non-decreasing,
/// and bounded within `[min_scaled, max_scaled]`, so lookups cannot miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationTable {
    spec: TableSpec,
    /// Dense storage indexed by raw score; length is `max_raw + 1`.
    scaled: Vec<i32>,
}

impl CalibrationTable {
    /// Builds a table from `(raw, scaled)` entries.
    pub fn new(spec: TableSpec, entries: &[(i32, i32)]) -> Result<Self, TableInvalid> {
        let audit = audit_table(spec, entries);
        if !audit.is_valid() {
            return Err(TableInvalid {
                issues: audit.issues,
            });
        }

        let mut scaled = vec![spec.min_scaled; (spec.max_raw + 1) as usize];
        for &(raw, value) in entries {
            scaled[raw as usize] = value;
        }
        Ok(Self { spec, scaled })
    }

    /// Scaled value for `raw` in O(1).
    ///
    /// Out-of-domain input clamps to the nearest endpoint of the domain;
    /// clamping is the only out-of-domain policy, there is no interpolation
    /// and no synthesized value.
    pub fn lookup(&self, raw: i32) -> i32 {
        let clamped = raw.clamp(0, self.spec.max_raw);
        self.scaled[clamped as usize]
    }

    pub fn spec(&self) -> TableSpec {
        self.spec
    }

    pub fn max_raw(&self) -> i32 {
        self.spec.max_raw
    }

    pub fn min_scaled(&self) -> i32 {
        self.spec.min_scaled
    }

    pub fn max_scaled(&self) -> i32 {
        self.spec.max_scaled
    }

    /// Iterates `(raw, scaled)` pairs in raw order.
    pub fn entries(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.scaled
            .iter()
            .enumerate()
            .map(|(raw, &scaled)| (raw as i32, scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableIssue;

    fn spec(max_raw: i32, min_scaled: i32, max_scaled: i32) -> TableSpec {
        TableSpec {
            max_raw,
            min_scaled,
            max_scaled,
        }
    }

    /// 0..=10 mapped to 0..=50 in steps of 5.
    fn small_table() -> CalibrationTable {
        let entries: Vec<(i32, i32)> = (0..=10).map(|r| (r, r * 5)).collect();
        CalibrationTable::new(spec(10, 0, 50), &entries).unwrap()
    }

    #[test]
    fn lookup_returns_exact_entries() {
        let table = small_table();
        assert_eq!(table.lookup(0), 0);
        assert_eq!(table.lookup(7), 35);
        assert_eq!(table.lookup(10), 50);
    }

    #[test]
    fn lookup_clamps_below_and_above() {
        let table = small_table();
        assert_eq!(table.lookup(-5), table.lookup(0));
        assert_eq!(table.lookup(150), table.lookup(10));
    }

    #[test]
    fn entry_order_does_not_matter() {
        let mut entries: Vec<(i32, i32)> = (0..=10).map(|r| (r, r * 5)).collect();
        entries.reverse();
        let table = CalibrationTable::new(spec(10, 0, 50), &entries).unwrap();
        assert_eq!(table.lookup(3), 15);
    }

    #[test]
    fn flat_region_returns_the_same_value() {
        let entries = vec![(0, 5), (1, 5), (2, 5), (3, 10), (4, 20)];
        let table = CalibrationTable::new(spec(4, 5, 20), &entries).unwrap();
        assert_eq!(table.lookup(0), 5);
        assert_eq!(table.lookup(1), 5);
        assert_eq!(table.lookup(2), 5);
        assert_eq!(table.lookup(3), 10);
    }

    #[test]
    fn construction_rejects_with_the_complete_issue_list() {
        // raw 1 missing and raw 3 decreasing: both must be reported
        let entries = vec![(0, 0), (2, 10), (3, 5), (4, 20)];
        let err = CalibrationTable::new(spec(4, 0, 20), &entries).unwrap_err();

        assert_eq!(err.issues.len(), 2, "issues: {:?}", err.issues);
        assert!(err.issues.contains(&TableIssue::MissingEntry { raw: 1 }));
        assert!(err.issues.contains(&TableIssue::DecreasingStep {
            raw: 3,
            scaled: 5,
            previous: 10,
        }));
    }

    #[test]
    fn entries_iterate_in_raw_order() {
        let table = small_table();
        let entries: Vec<(i32, i32)> = table.entries().collect();
        assert_eq!(entries.len(), 11);
        assert_eq!(entries[0], (0, 0));
        assert_eq!(entries[10], (10, 50));
    }

    #[test]
    fn identical_input_always_yields_identical_output() {
        let table = small_table();
        let first = table.lookup(6);
        for _ in 0..3 {
            assert_eq!(table.lookup(6), first);
        }
    }
}
