//! Record processor
//!
//! This module provides the [`RecordProcessor`] that orchestrates PII
//! detection and redaction for a single record.
//!
//! # Architecture
//!
//! The processor coordinates four components:
//! - **Classifier**: assigns a category to each field
//! - **Combinatorial evaluator**: flags records that are PII by association
//! - **Redactor**: masks every field that has to be hidden
//! - **Pattern registry / field-name rules**: shared read-only behind `Arc`
//!
//! # Examples
//!
//! ```
//! use pii_guardian::detection::RecordProcessor;
//! use pii_guardian::domain::Record;
//!
//! # fn example() -> anyhow::Result<()> {
//! let processor = RecordProcessor::with_defaults()?;
//!
//! let record: Record = [("name", "John Doe"), ("phone", "9876543210")]
//!     .into_iter()
//!     .collect();
//! let verdict = processor.process(&record);
//!
//! assert!(verdict.has_pii);
//! assert_eq!(verdict.redacted.get("name"), Some("JXXX DXXX"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::detection::{
    classifier::FieldClassifier,
    combinator::CombinatorialEvaluator,
    config::DetectionConfig,
    models::{Diagnostic, RecordVerdict},
    patterns::PatternRegistry,
    redactor::Redactor,
    rules::FieldNameRules,
};
use crate::domain::Record;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Detection and redaction engine for one record at a time
///
/// # Thread Safety
///
/// The processor holds no mutable state. The registry and the field-name
/// rules are immutable after construction and shared through `Arc`, so the
/// processor is `Send + Sync` and can be cloned cheaply.
#[derive(Debug, Clone)]
pub struct RecordProcessor {
    classifier: FieldClassifier,
    evaluator: CombinatorialEvaluator,
    redactor: Redactor,
}

impl RecordProcessor {
    /// Create a processor from detection configuration
    ///
    /// Loads the field-name rules from `rules_file` when set, otherwise the
    /// built-in rules. Address keywords declared in the rules file replace
    /// the built-in keyword list.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The rules file cannot be read or parsed
    /// - A pattern fails to compile
    pub fn new(config: &DetectionConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid detection configuration")?;

        let rules = match config.rules_file {
            Some(ref path) => FieldNameRules::from_file(path)?,
            None => FieldNameRules::default_rules()?,
        };

        let registry = match rules.address_keywords() {
            Some(keywords) => PatternRegistry::with_address_keywords(keywords)?,
            None => PatternRegistry::new()?,
        };

        tracing::debug!(
            rules_file = ?config.rules_file,
            custom_address_keywords = rules.address_keywords().is_some(),
            "Initialized record processor"
        );

        Ok(Self::from_parts(Arc::new(registry), Arc::new(rules)))
    }

    /// Create a processor with built-in patterns and rules
    pub fn with_defaults() -> Result<Self> {
        Self::new(&DetectionConfig::default())
    }

    /// Assemble a processor from already-built components
    pub fn from_parts(registry: Arc<PatternRegistry>, rules: Arc<FieldNameRules>) -> Self {
        Self {
            classifier: FieldClassifier::new(Arc::clone(&registry), rules),
            evaluator: CombinatorialEvaluator::new(),
            redactor: Redactor::new(registry),
        }
    }

    /// Field classifier used by this processor
    pub fn classifier(&self) -> &FieldClassifier {
        &self.classifier
    }

    /// Redactor used by this processor
    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    /// Process one record
    ///
    /// # Behavior
    ///
    /// 1. Classifies every field
    /// 2. Evaluates the combinatorial signal
    /// 3. Redacts every standalone field and, when the record is PII, every
    ///    field carrying a combinatorial category
    ///
    /// All other fields are copied unchanged. A value that does not fit its
    /// category's masking shape is replaced by the category placeholder and a
    /// [`Diagnostic`] is attached to the verdict. This never fails.
    pub fn process(&self, record: &Record) -> RecordVerdict {
        let classifications = self.classifier.classify_record(record);

        let standalone = classifications
            .iter()
            .any(|c| c.classification.is_standalone_pii);
        let combinatorial = self.evaluator.evaluate(record, &classifications);
        let has_pii = standalone || combinatorial;

        let mut redacted = Record::with_capacity(record.len());
        let mut diagnostics = Vec::new();

        for (field, result) in record.iter().zip(&classifications) {
            let category = result.classification.category;
            let must_redact = result.classification.is_standalone_pii
                || (has_pii && category.is_combinatorial());

            let value = match field.value.as_deref() {
                Some(raw) if must_redact => Some(match self.redactor.mask(raw, category) {
                    Ok(masked) => masked,
                    Err(e) => {
                        tracing::warn!(
                            field = %field.name,
                            category = %category,
                            error = %e,
                            "Redaction fell back to placeholder"
                        );
                        diagnostics.push(Diagnostic::RedactionFallback {
                            field: field.name.clone(),
                            category,
                        });
                        category.placeholder()
                    }
                }),
                _ => field.value.clone(),
            };

            redacted.insert(field.name.clone(), value);
        }

        tracing::trace!(
            fields = record.len(),
            has_pii,
            standalone,
            combinatorial,
            "Processed record"
        );

        RecordVerdict {
            has_pii,
            redacted,
            classifications,
            combinatorial,
            diagnostics,
        }
    }
}
