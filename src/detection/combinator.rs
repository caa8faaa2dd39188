//! Combinatorial PII evaluation
//!
//! Names, addresses, device identifiers and IP addresses do not identify a
//! person alone. A record becomes PII by association once at least two
//! distinct such categories appear in it.

use crate::detection::models::{FieldClassification, PiiCategory};
use crate::domain::Record;
use std::collections::BTreeSet;

/// Distinct combinatorial categories needed for a record to count as PII
pub const MIN_DISTINCT_CATEGORIES: usize = 2;

/// Decides PII-by-association across a full record
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinatorialEvaluator;

impl CombinatorialEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Check whether the record is PII through co-occurring categories
    ///
    /// Categories are counted once each, no matter how many fields carry
    /// them. Classifications for fields the record does not hold a value for
    /// are ignored.
    pub fn evaluate(&self, record: &Record, classifications: &[FieldClassification]) -> bool {
        self.distinct_categories(record, classifications).len() >= MIN_DISTINCT_CATEGORIES
    }

    /// Distinct combinatorial categories present in the record
    pub fn distinct_categories(
        &self,
        record: &Record,
        classifications: &[FieldClassification],
    ) -> BTreeSet<PiiCategory> {
        classifications
            .iter()
            .filter(|c| c.classification.category.is_combinatorial())
            .filter(|c| record.get(&c.field).is_some())
            .map(|c| c.classification.category)
            .collect()
    }
}
