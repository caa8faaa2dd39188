//! Field classifier
//!
//! Maps a single (field name, value) pair to a [`Classification`]. Standalone
//! categories are tested by value shape in a fixed priority order; the first
//! match wins. Only when none match are the combinatorial categories tried,
//! each gated by its field-name allow-list.

use crate::detection::models::{Classification, FieldClassification, PiiCategory};
use crate::detection::patterns::PatternRegistry;
use crate::detection::rules::FieldNameRules;
use crate::domain::Record;
use std::sync::Arc;

/// Standalone categories in evaluation order
///
/// `NationalId` precedes `Phone` so a 12-digit identifier is never read as a
/// phone number with a country code; `Email` precedes `PaymentHandle` so an
/// email address is never double-classified as a payment handle.
pub const STANDALONE_PRIORITY: [PiiCategory; 5] = [
    PiiCategory::NationalId,
    PiiCategory::Phone,
    PiiCategory::Passport,
    PiiCategory::Email,
    PiiCategory::PaymentHandle,
];

/// Combinatorial categories in evaluation order
pub const COMBINATORIAL_PRIORITY: [PiiCategory; 4] = [
    PiiCategory::Name,
    PiiCategory::Address,
    PiiCategory::DeviceId,
    PiiCategory::IpAddress,
];

/// Classifies individual fields against the pattern registry
#[derive(Debug, Clone)]
pub struct FieldClassifier {
    registry: Arc<PatternRegistry>,
    rules: Arc<FieldNameRules>,
}

impl FieldClassifier {
    pub fn new(registry: Arc<PatternRegistry>, rules: Arc<FieldNameRules>) -> Self {
        Self { registry, rules }
    }

    /// Classify one field
    ///
    /// Absent and blank values classify as [`PiiCategory::None`]. The value is
    /// always tested as a whole (after trimming), never by substring.
    pub fn classify(&self, field_name: &str, value: Option<&str>) -> Classification {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Classification::NONE;
        };

        let standalone = STANDALONE_PRIORITY
            .into_iter()
            .find(|category| self.registry.matches(*category, value));
        if let Some(category) = standalone {
            return Classification::new(category);
        }

        COMBINATORIAL_PRIORITY
            .into_iter()
            .find(|category| {
                self.rules.recognizes(*category, field_name)
                    && self.registry.matches(*category, value)
            })
            .map_or(Classification::NONE, Classification::new)
    }

    /// Classify every field of a record, in record order
    pub fn classify_record(&self, record: &Record) -> Vec<FieldClassification> {
        record
            .iter()
            .map(|field| FieldClassification {
                field: field.name.clone(),
                classification: self.classify(&field.name, field.value.as_deref()),
            })
            .collect()
    }
}
