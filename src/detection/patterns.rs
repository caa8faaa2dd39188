//! Pattern registry for PII shape rules
//!
//! Holds the compiled matchers for every category. The registry is built once
//! and shared read-only (behind `Arc`) by the classifier and the redactor.

use crate::detection::models::PiiCategory;
use anyhow::{Context, Result};
use regex::Regex;
use std::net::IpAddr;

/// Country calling code accepted in front of a phone number
const COUNTRY_CODE: &str = "91";

/// Number of digits in a subscriber phone number
pub const PHONE_DIGITS: usize = 10;

/// Locality and state keywords that anchor a value as an address
///
/// City names are deliberately absent: a bare city does not identify anyone.
pub const DEFAULT_ADDRESS_KEYWORDS: &[&str] = &[
    // States and union territories
    "andhra pradesh",
    "arunachal pradesh",
    "assam",
    "bihar",
    "chhattisgarh",
    "goa",
    "gujarat",
    "haryana",
    "himachal pradesh",
    "jharkhand",
    "karnataka",
    "kerala",
    "madhya pradesh",
    "maharashtra",
    "manipur",
    "meghalaya",
    "mizoram",
    "nagaland",
    "odisha",
    "punjab",
    "rajasthan",
    "sikkim",
    "tamil nadu",
    "telangana",
    "tripura",
    "uttar pradesh",
    "uttarakhand",
    "west bengal",
    "andaman and nicobar",
    "chandigarh",
    "dadra and nagar haveli",
    "daman and diu",
    "jammu and kashmir",
    "ladakh",
    "lakshadweep",
    "puducherry",
    // Locality markers
    "street",
    "road",
    "marg",
    "lane",
    "nagar",
    "colony",
    "sector",
    "layout",
    "apartment",
    "apartments",
    "flat",
    "floor",
    "block",
    "phase",
    "society",
    "village",
    "district",
];

/// Pattern registry for PII detection
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    national_id: Regex,
    passport: Regex,
    email: Regex,
    payment_handle: Regex,
    phone_chars: Regex,
    phone_parenthesized: Regex,
    postal_code: Regex,
    address_keywords: Option<Regex>,
    uuid: Regex,
    hex_token: Regex,
    mac_address: Regex,
    serial_token: Regex,
    name_token: Regex,
}

impl PatternRegistry {
    /// Create a registry with the built-in address keywords
    pub fn new() -> Result<Self> {
        Self::with_address_keywords(DEFAULT_ADDRESS_KEYWORDS.iter().copied())
    }

    /// Create a registry with a custom set of address anchor keywords
    pub fn with_address_keywords<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let escaped: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .map(|k| regex::escape(&k).replace(' ', r"\s+"))
            .collect();

        let address_keywords = if escaped.is_empty() {
            None
        } else {
            Some(compile(&format!(r"(?i)\b(?:{})\b", escaped.join("|")))?)
        };

        Ok(Self {
            national_id: compile(r"^[2-9][0-9]{3}[ -]?[0-9]{4}[ -]?[0-9]{4}$")?,
            passport: compile(r"^[A-Z][0-9]{7}$")?,
            email: compile(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")?,
            payment_handle: compile(r"^[A-Za-z0-9._-]{2,256}@[A-Za-z]{2,64}$")?,
            phone_chars: compile(r"^\+?[0-9\s()-]+$")?,
            phone_parenthesized: compile(r"^[\s-]*\([0-9]{3,5}\)[0-9\s-]+$")?,
            postal_code: compile(r"\b(?:[1-9][0-9]{5}|[0-9]{5}(?:-[0-9]{4})?)\b")?,
            address_keywords,
            uuid: compile(
                r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
            )?,
            hex_token: compile(r"^(?:0[xX])?[0-9a-fA-F]{8,64}$")?,
            mac_address: compile(r"^(?:[0-9a-fA-F]{2}[:-]){5}[0-9a-fA-F]{2}$")?,
            serial_token: compile(r"^[A-Za-z0-9][A-Za-z0-9_-]{5,63}$")?,
            name_token: compile(r"^\p{L}[\p{L}.'-]*$")?,
        })
    }

    /// Test whether `value` satisfies the shape of `category`
    ///
    /// The value is trimmed first and always tested as a whole; substrings
    /// never match. Empty input matches nothing. Numeric shapes accept ASCII
    /// digits only, the same digits the redactor masks.
    pub fn matches(&self, category: PiiCategory, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        match category {
            PiiCategory::Phone => self.phone_subscriber_start(value).is_some(),
            PiiCategory::NationalId => self.national_id.is_match(value),
            PiiCategory::Passport => self.passport.is_match(value),
            PiiCategory::PaymentHandle => self.payment_handle.is_match(value),
            PiiCategory::Email => self.email.is_match(value),
            PiiCategory::Name => self.has_name_token(value),
            PiiCategory::Address => self.has_address_anchor(value),
            PiiCategory::DeviceId => self.is_device_id(value),
            PiiCategory::IpAddress => value.parse::<IpAddr>().is_ok(),
            PiiCategory::None => false,
        }
    }

    /// Byte offset at which the 10-digit subscriber number starts
    ///
    /// Returns `None` unless the value is a phone number: an optional `+91`
    /// or `91` prefix followed by exactly ten digits, with spaces, hyphens
    /// and a single parenthesised group of 3–5 leading digits allowed.
    pub fn phone_subscriber_start(&self, value: &str) -> Option<usize> {
        if !self.phone_chars.is_match(value) {
            return None;
        }

        let total_digits = count_digits(value);
        let start = if let Some(rest) = value.strip_prefix('+') {
            if !rest.starts_with(COUNTRY_CODE) {
                return None;
            }
            1 + COUNTRY_CODE.len()
        } else if total_digits == PHONE_DIGITS {
            0
        } else if total_digits == PHONE_DIGITS + COUNTRY_CODE.len()
            && value.starts_with(COUNTRY_CODE)
        {
            COUNTRY_CODE.len()
        } else {
            return None;
        };

        let subscriber = &value[start..];
        if count_digits(subscriber) != PHONE_DIGITS {
            return None;
        }

        let has_parens = subscriber.contains(['(', ')']);
        if has_parens && !self.phone_parenthesized.is_match(subscriber) {
            return None;
        }
        if value[..start].contains(['(', ')']) {
            return None;
        }

        Some(start)
    }

    /// Check for a postal code or a locality/state keyword
    pub fn has_address_anchor(&self, value: &str) -> bool {
        self.postal_code.is_match(value)
            || self
                .address_keywords
                .as_ref()
                .is_some_and(|re| re.is_match(value))
    }

    fn has_name_token(&self, value: &str) -> bool {
        value
            .split_whitespace()
            .any(|token| self.name_token.is_match(token))
    }

    fn is_device_id(&self, value: &str) -> bool {
        self.uuid.is_match(value)
            || self.hex_token.is_match(value)
            || self.mac_address.is_match(value)
            || (self.serial_token.is_match(value) && count_digits(value) >= 4)
    }
}

/// Count ASCII digits in a string
pub fn count_digits(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Invalid built-in pattern: {pattern}"))
}
