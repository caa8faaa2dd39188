//! Category-specific masking
//!
//! | Category                          | Masked form                                   |
//! |-----------------------------------|-----------------------------------------------|
//! | phone                             | first 2 and last 2 subscriber digits kept     |
//! | national_id                       | last 4 digits kept, grouping preserved        |
//! | email / payment_handle            | first 3 local chars + `XXX`, `@domain` kept   |
//! | name                              | first letter of each token + `XXX`            |
//! | passport / address / device / ip  | `[REDACTED_<CATEGORY>]`                       |
//!
//! Digit masks keep the original width. A masked local part is always 3
//! characters (local parts of 3 or fewer) or 6, and a masked name token is
//! always 4, so short inputs may grow by up to 3 characters.
//!
//! [`Redactor::redact`] never fails: a value that does not fit its category's
//! shape is replaced by the category placeholder. [`Redactor::mask`] exposes
//! the mismatch instead.

use crate::detection::models::PiiCategory;
use crate::detection::patterns::{count_digits, PatternRegistry, PHONE_DIGITS};
use std::sync::Arc;
use thiserror::Error;

/// Character used to mask digits
pub const MASK_CHAR: char = 'X';

/// Fixed mask appended after the kept prefix of names and handles
const MASK_SUFFIX: &str = "XXX";

/// Leading digits of a phone number left visible
const PHONE_KEEP_HEAD: usize = 2;

/// Trailing digits of a phone number left visible
const PHONE_KEEP_TAIL: usize = 2;

/// Trailing digits of a national ID left visible
const NATIONAL_ID_KEEP_TAIL: usize = 4;

/// Leading local-part characters of an email or payment handle left visible
const LOCAL_KEEP_HEAD: usize = 3;

/// Strict masking failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedactionError {
    /// The value is inconsistent with the category it was assigned
    #[error("value does not fit the {category} masking shape")]
    ShapeMismatch { category: PiiCategory },
}

/// Produces masked replacements for detected PII
#[derive(Debug, Clone)]
pub struct Redactor {
    registry: Arc<PatternRegistry>,
}

impl Redactor {
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self { registry }
    }

    /// Mask a value, falling back to the category placeholder on mismatch
    pub fn redact(&self, value: &str, category: PiiCategory) -> String {
        self.mask(value, category)
            .unwrap_or_else(|_| category.placeholder())
    }

    /// Mask a value, reporting values that do not fit the category's shape
    ///
    /// [`PiiCategory::None`] returns the value unchanged.
    pub fn mask(&self, value: &str, category: PiiCategory) -> Result<String, RedactionError> {
        let trimmed = value.trim();
        let mismatch = RedactionError::ShapeMismatch { category };

        match category {
            PiiCategory::None => Ok(value.to_string()),
            PiiCategory::Passport
            | PiiCategory::Address
            | PiiCategory::DeviceId
            | PiiCategory::IpAddress => Ok(category.placeholder()),
            PiiCategory::Phone => {
                let start = self
                    .registry
                    .phone_subscriber_start(trimmed)
                    .ok_or(mismatch)?;
                let (prefix, subscriber) = trimmed.split_at(start);
                Ok(format!(
                    "{prefix}{}",
                    mask_digits(subscriber, |idx| {
                        idx < PHONE_KEEP_HEAD || idx >= PHONE_DIGITS - PHONE_KEEP_TAIL
                    })
                ))
            }
            PiiCategory::NationalId => {
                if !self.registry.matches(category, trimmed) {
                    return Err(mismatch);
                }
                let keep_from = count_digits(trimmed).saturating_sub(NATIONAL_ID_KEEP_TAIL);
                Ok(mask_digits(trimmed, |idx| idx >= keep_from))
            }
            PiiCategory::Email | PiiCategory::PaymentHandle => {
                if !self.registry.matches(category, trimmed) {
                    return Err(mismatch);
                }
                let (local, domain) = trimmed.split_once('@').ok_or(mismatch)?;
                Ok(format!("{}@{domain}", mask_local_part(local)))
            }
            PiiCategory::Name => {
                if trimmed.is_empty() {
                    return Err(mismatch);
                }
                Ok(mask_name(trimmed))
            }
        }
    }
}

/// Replace digits with [`MASK_CHAR`] unless `keep(digit_index)` holds
///
/// Non-digit characters (spaces, hyphens, parentheses) pass through, so the
/// original grouping survives.
fn mask_digits(value: &str, keep: impl Fn(usize) -> bool) -> String {
    let mut digit_idx = 0;
    value
        .chars()
        .map(|c| {
            if !c.is_ascii_digit() {
                return c;
            }
            let masked = if keep(digit_idx) { c } else { MASK_CHAR };
            digit_idx += 1;
            masked
        })
        .collect()
}

fn mask_local_part(local: &str) -> String {
    if local.chars().count() > LOCAL_KEEP_HEAD {
        let head: String = local.chars().take(LOCAL_KEEP_HEAD).collect();
        format!("{head}{MASK_SUFFIX}")
    } else {
        MASK_SUFFIX.to_string()
    }
}

fn mask_name(value: &str) -> String {
    let mut masked = String::with_capacity(value.len() + MASK_SUFFIX.len());
    let mut token_start = true;
    for c in value.chars() {
        if c.is_whitespace() {
            masked.push(c);
            token_start = true;
        } else if token_start {
            masked.push(c);
            masked.push_str(MASK_SUFFIX);
            token_start = false;
        }
    }
    masked
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn redactor() -> Redactor {
        Redactor::new(Arc::new(PatternRegistry::new().unwrap()))
    }

    #[test_case("9876543210", "98XXXXXX10" ; "bare")]
    #[test_case("+91 98765 43210", "+91 98XXX XXX10" ; "plus prefix spaced")]
    #[test_case("919876543210", "9198XXXXXX10" ; "country code joined")]
    #[test_case("(98765) 43210", "(98XXX) XXX10" ; "parenthesised")]
    fn test_phone_masking(value: &str, expected: &str) {
        assert_eq!(redactor().redact(value, PiiCategory::Phone), expected);
    }

    #[test_case("2345 6789 0123", "XXXX XXXX 0123" ; "spaced")]
    #[test_case("234567890123", "XXXXXXXX0123" ; "joined")]
    #[test_case("2345-6789-0123", "XXXX-XXXX-0123" ; "hyphenated")]
    fn test_national_id_masking(value: &str, expected: &str) {
        assert_eq!(redactor().redact(value, PiiCategory::NationalId), expected);
    }

    #[test]
    fn test_email_keeps_domain() {
        let redactor = redactor();
        assert_eq!(
            redactor.redact("john.doe@example.com", PiiCategory::Email),
            "johXXX@example.com"
        );
        assert_eq!(redactor.redact("jo@example.com", PiiCategory::Email), "XXX@example.com");
    }

    #[test]
    fn test_payment_handle_keeps_suffix() {
        let redactor = redactor();
        assert_eq!(redactor.redact("user@paytm", PiiCategory::PaymentHandle), "useXXX@paytm");
        assert_eq!(redactor.redact("ab@ybl", PiiCategory::PaymentHandle), "XXX@ybl");
    }

    #[test]
    fn test_name_masks_each_token() {
        let redactor = redactor();
        assert_eq!(redactor.redact("John Doe", PiiCategory::Name), "JXXX DXXX");
        assert_eq!(redactor.redact("Priya", PiiCategory::Name), "PXXX");
        assert_eq!(
            redactor.redact("Ravi  Kumar Sharma", PiiCategory::Name),
            "RXXX  KXXX SXXX"
        );
    }

    #[test_case(PiiCategory::Passport, "P1234567")]
    #[test_case(PiiCategory::Address, "12 MG Road, 560001")]
    #[test_case(PiiCategory::DeviceId, "DEV123456")]
    #[test_case(PiiCategory::IpAddress, "192.168.0.1")]
    fn test_placeholder_categories_are_idempotent(category: PiiCategory, value: &str) {
        let redactor = redactor();
        let once = redactor.redact(value, category);
        let twice = redactor.redact(&once, category);

        assert_eq!(once, category.placeholder());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_shape_mismatch_falls_back_to_placeholder() {
        let redactor = redactor();
        assert_eq!(
            redactor.mask("not a phone", PiiCategory::Phone),
            Err(RedactionError::ShapeMismatch {
                category: PiiCategory::Phone
            })
        );
        assert_eq!(redactor.redact("not a phone", PiiCategory::Phone), "[REDACTED_PHONE]");
        assert_eq!(redactor.redact("nobody", PiiCategory::Email), "[REDACTED_EMAIL]");
        assert_eq!(
            redactor.redact("1234 5678 9012", PiiCategory::NationalId),
            "[REDACTED_NATIONAL_ID]"
        );
    }

    #[test]
    fn test_none_is_unchanged() {
        assert_eq!(redactor().redact(" as is ", PiiCategory::None), " as is ");
    }

    #[test]
    fn test_non_ascii_digits_are_never_returned_verbatim() {
        let redactor = redactor();
        let value = "2३४५ ६७८९ ०१२३";

        assert!(redactor.mask(value, PiiCategory::NationalId).is_err());
        assert_eq!(
            redactor.redact(value, PiiCategory::NationalId),
            "[REDACTED_NATIONAL_ID]"
        );
        assert_eq!(redactor.redact("९८७६५४३२१०", PiiCategory::Phone), "[REDACTED_PHONE]");
    }

    #[test_case("9876543210", PiiCategory::Phone ; "phone")]
    #[test_case("(98765) 43210", PiiCategory::Phone ; "parenthesised phone")]
    #[test_case("2345 6789 0123", PiiCategory::NationalId ; "national id")]
    fn test_digit_masking_keeps_width(value: &str, category: PiiCategory) {
        let masked = redactor().redact(value, category);
        assert_eq!(masked.chars().count(), value.chars().count());
    }

    #[test_case("jo@example.com", PiiCategory::Email, "XXX@example.com" ; "two char local grows to three")]
    #[test_case("abc@ybl", PiiCategory::PaymentHandle, "XXX@ybl" ; "three char local")]
    #[test_case("john@example.com", PiiCategory::Email, "johXXX@example.com" ; "four char local grows to six")]
    #[test_case("priya.sharma@example.com", PiiCategory::Email, "priXXX@example.com" ; "long local shrinks to six")]
    fn test_local_part_width_is_three_or_six(value: &str, category: PiiCategory, expected: &str) {
        let masked = redactor().redact(value, category);
        assert_eq!(masked, expected);

        let (local, domain) = masked.split_once('@').unwrap();
        assert!(matches!(local.chars().count(), 3 | 6));
        assert!(value.ends_with(&format!("@{domain}")));
    }

    #[test]
    fn test_name_tokens_mask_to_four_chars() {
        let masked = redactor().redact("Al Ümit Bartholomew", PiiCategory::Name);
        assert_eq!(masked, "AXXX ÜXXX BXXX");
        assert!(masked
            .split_whitespace()
            .all(|token| token.chars().count() == 4));
    }

    #[test]
    fn test_masking_preserves_phone_length() {
        let value = "+91-98765-43210";
        assert_eq!(redactor().redact(value, PiiCategory::Phone).len(), value.len());
    }
}
