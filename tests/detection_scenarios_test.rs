//! Integration tests for record-level detection and redaction

use pii_guardian::detection::{PiiCategory, RecordProcessor};
use pii_guardian::domain::Record;
use test_case::test_case;

fn processor() -> RecordProcessor {
    RecordProcessor::with_defaults().expect("default rules load")
}

fn record(fields: &[(&str, &str)]) -> Record {
    fields.iter().copied().collect()
}

#[test]
fn test_phone_alone_is_pii() {
    let input = record(&[("phone", "9876543210"), ("order_value", "500")]);
    let verdict = processor().process(&input);

    assert!(verdict.has_pii);
    assert!(!verdict.combinatorial);
    assert_eq!(verdict.redacted.get("phone"), Some("98XXXXXX10"));
    assert_eq!(verdict.redacted.get("order_value"), Some("500"));
}

#[test]
fn test_single_name_is_not_pii() {
    let input = record(&[("name", "John Doe"), ("product", "Laptop")]);
    let verdict = processor().process(&input);

    assert!(!verdict.has_pii);
    assert_eq!(verdict.redacted, input);
}

#[test]
fn test_name_with_address_is_combinatorial_pii() {
    let input = record(&[
        ("name", "Priya Sharma"),
        ("address", "12 MG Road, Bengaluru 560001"),
    ]);
    let verdict = processor().process(&input);

    assert!(verdict.has_pii);
    assert!(verdict.combinatorial);
    assert_eq!(verdict.redacted.get("name"), Some("PXXX SXXX"));
    assert_eq!(verdict.redacted.get("address"), Some("[REDACTED_ADDRESS]"));
}

#[test]
fn test_name_with_bare_city_is_not_pii() {
    let input = record(&[("name", "John"), ("city", "New York")]);
    let verdict = processor().process(&input);

    assert!(!verdict.has_pii);
    assert_eq!(verdict.redacted.get("city"), Some("New York"));
}

#[test]
fn test_email_alone_redacts_name_too() {
    let input = record(&[("name", "John Doe"), ("email", "john.doe@example.com")]);
    let verdict = processor().process(&input);

    assert!(verdict.has_pii);
    assert_eq!(verdict.redacted.get("email"), Some("johXXX@example.com"));
    assert_eq!(verdict.redacted.get("name"), Some("JXXX DXXX"));
}

#[test]
fn test_repeated_category_counts_once() {
    let input = record(&[("first_name", "Asha"), ("last_name", "Rao")]);
    let verdict = processor().process(&input);

    assert!(!verdict.has_pii);
    assert!(!verdict.combinatorial);
}

#[test]
fn test_device_and_ip_together_are_pii() {
    let input = record(&[("device_id", "a1b2c3d4e5f6"), ("ip_address", "192.168.1.10")]);
    let verdict = processor().process(&input);

    assert!(verdict.has_pii);
    assert_eq!(verdict.redacted.get("device_id"), Some("[REDACTED_DEVICE_ID]"));
    assert_eq!(verdict.redacted.get("ip_address"), Some("[REDACTED_IP_ADDRESS]"));
}

#[test_case("aadhar", "2345 6789 0123", "XXXX XXXX 0123" ; "national id")]
#[test_case("passport", "P1234567", "[REDACTED_PASSPORT]" ; "passport")]
#[test_case("upi_id", "user@ybl", "useXXX@ybl" ; "payment handle")]
#[test_case("contact", "+91 98765 43210", "+91 98XXX XXX10" ; "phone with country code")]
fn test_standalone_values_are_masked(field: &str, value: &str, expected: &str) {
    let verdict = processor().process(&record(&[(field, value)]));

    assert!(verdict.has_pii);
    assert_eq!(verdict.redacted.get(field), Some(expected));
}

#[test]
fn test_classifications_follow_record_order() {
    let input = record(&[
        ("phone", "9876543210"),
        ("name", "John"),
        ("notes", "call later"),
    ]);
    let verdict = processor().process(&input);

    let categories: Vec<_> = verdict
        .classifications
        .iter()
        .map(|c| (c.field.as_str(), c.classification.category))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("phone", PiiCategory::Phone),
            ("name", PiiCategory::Name),
            ("notes", PiiCategory::None),
        ]
    );
}

#[test]
fn test_absent_values_are_left_alone() {
    let mut input = Record::new();
    input.insert("name", None);
    input.insert("phone", Some("9876543210".to_string()));

    let verdict = processor().process(&input);

    assert!(verdict.has_pii);
    assert_eq!(verdict.redacted.get("name"), None);
    assert!(verdict.redacted.contains("name"));
}

#[test]
fn test_processing_is_independent_per_record() {
    let processor = processor();
    let first = record(&[("name", "John")]);
    let second = record(&[("address", "Flat 4, Andheri, Maharashtra")]);

    assert!(!processor.process(&first).has_pii);
    assert!(!processor.process(&second).has_pii);
}
