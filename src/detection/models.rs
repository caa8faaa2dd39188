//! PII classification data models

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Record;

/// PII category enumeration
///
/// Standalone categories identify an individual on their own. The remaining
/// categories only become PII when at least two distinct ones co-occur in a
/// record (or when the record is already PII through a standalone field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    /// Ten-digit mobile number, optionally with a `+91`/`91` country code
    Phone,
    /// Twelve-digit national identity number (Aadhaar format)
    NationalId,
    /// One uppercase letter followed by seven digits
    Passport,
    /// UPI-style payment handle (`local@bank`)
    PaymentHandle,
    /// Email address
    Email,
    /// Person name, recognised by field name
    Name,
    /// Postal address or locality with a postal/state anchor
    Address,
    /// Device identifier (UUID, hex, MAC or serial-like token)
    DeviceId,
    /// IPv4 or IPv6 address
    IpAddress,
    /// No PII detected
    None,
}

impl PiiCategory {
    /// Categories that constitute PII on their own
    pub const STANDALONE: [PiiCategory; 5] = [
        Self::Phone,
        Self::NationalId,
        Self::Passport,
        Self::PaymentHandle,
        Self::Email,
    ];

    /// Categories that only constitute PII in combination
    pub const COMBINATORIAL: [PiiCategory; 4] =
        [Self::Name, Self::Address, Self::DeviceId, Self::IpAddress];

    /// Upper-case label used in placeholders and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phone => "PHONE",
            Self::NationalId => "NATIONAL_ID",
            Self::Passport => "PASSPORT",
            Self::PaymentHandle => "PAYMENT_HANDLE",
            Self::Email => "EMAIL",
            Self::Name => "NAME",
            Self::Address => "ADDRESS",
            Self::DeviceId => "DEVICE_ID",
            Self::IpAddress => "IP_ADDRESS",
            Self::None => "NONE",
        }
    }

    /// Fixed placeholder token naming the category
    pub fn placeholder(&self) -> String {
        format!("[REDACTED_{}]", self.label())
    }

    /// Check if this category is PII on its own
    pub fn is_standalone(&self) -> bool {
        matches!(
            self,
            Self::Phone | Self::NationalId | Self::Passport | Self::PaymentHandle | Self::Email
        )
    }

    /// Check if this category only counts in combination with another
    pub fn is_combinatorial(&self) -> bool {
        matches!(
            self,
            Self::Name | Self::Address | Self::DeviceId | Self::IpAddress
        )
    }

    /// Parse a snake_case category name as used in rule files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "phone" => Some(Self::Phone),
            "national_id" | "aadhar" | "aadhaar" => Some(Self::NationalId),
            "passport" => Some(Self::Passport),
            "payment_handle" | "upi" | "upi_id" => Some(Self::PaymentHandle),
            "email" => Some(Self::Email),
            "name" => Some(Self::Name),
            "address" => Some(Self::Address),
            "device_id" => Some(Self::DeviceId),
            "ip_address" => Some(Self::IpAddress),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Phone => "phone",
            Self::NationalId => "national_id",
            Self::Passport => "passport",
            Self::PaymentHandle => "payment_handle",
            Self::Email => "email",
            Self::Name => "name",
            Self::Address => "address",
            Self::DeviceId => "device_id",
            Self::IpAddress => "ip_address",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Classification of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Detected category
    pub category: PiiCategory,
    /// Whether the value is PII on its own
    pub is_standalone_pii: bool,
}

impl Classification {
    /// Classification for a field that matched nothing
    pub const NONE: Classification = Classification {
        category: PiiCategory::None,
        is_standalone_pii: false,
    };

    pub fn new(category: PiiCategory) -> Self {
        Self {
            category,
            is_standalone_pii: category.is_standalone(),
        }
    }

    /// Check if the field carries any category at all
    pub fn is_detected(&self) -> bool {
        self.category != PiiCategory::None
    }
}

/// Classification bound to the field it was computed for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldClassification {
    pub field: String,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Caller-visible note about a degraded operation inside the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The value did not fit its category's masking shape; the placeholder was used
    RedactionFallback { field: String, category: PiiCategory },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedactionFallback { field, category } => write!(
                f,
                "field '{field}' did not fit the {category} masking shape; replaced with placeholder"
            ),
        }
    }
}

/// Outcome of processing one record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordVerdict {
    /// Whether the record contains PII
    pub has_pii: bool,
    /// Redacted copy of the input record
    pub redacted: Record,
    /// Per-field classifications, in record order
    pub classifications: Vec<FieldClassification>,
    /// Whether the combinatorial signal fired
    pub combinatorial: bool,
    /// Degraded operations encountered while redacting
    pub diagnostics: Vec<Diagnostic>,
}

impl RecordVerdict {
    /// Fields that were rewritten by the redactor
    pub fn redacted_fields(&self) -> impl Iterator<Item = &FieldClassification> {
        let has_pii = self.has_pii;
        self.classifications.iter().filter(move |c| {
            c.classification.is_standalone_pii
                || (has_pii && c.classification.category.is_combinatorial())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_and_combinatorial_are_disjoint() {
        for category in PiiCategory::STANDALONE {
            assert!(category.is_standalone());
            assert!(!category.is_combinatorial());
        }
        for category in PiiCategory::COMBINATORIAL {
            assert!(category.is_combinatorial());
            assert!(!category.is_standalone());
        }
        assert!(!PiiCategory::None.is_standalone());
        assert!(!PiiCategory::None.is_combinatorial());
    }

    #[test]
    fn test_placeholder_names_category() {
        assert_eq!(PiiCategory::Passport.placeholder(), "[REDACTED_PASSPORT]");
        assert_eq!(PiiCategory::IpAddress.placeholder(), "[REDACTED_IP_ADDRESS]");
    }

    #[test]
    fn test_from_name_round_trips_display() {
        for category in PiiCategory::STANDALONE
            .iter()
            .chain(PiiCategory::COMBINATORIAL.iter())
        {
            assert_eq!(PiiCategory::from_name(&category.to_string()), Some(*category));
        }
        assert_eq!(PiiCategory::from_name("UPI"), Some(PiiCategory::PaymentHandle));
        assert_eq!(PiiCategory::from_name("ssn"), None);
    }

    #[test]
    fn test_classification_new_sets_standalone_flag() {
        assert!(Classification::new(PiiCategory::Email).is_standalone_pii);
        assert!(!Classification::new(PiiCategory::Name).is_standalone_pii);
        assert!(!Classification::NONE.is_detected());
    }
}
