//! Field validation rules for the contact and newsletter forms.
//!
//! Each recognized field id owns an ordered rule-set. Rules are evaluated in
//! order and the first failing rule decides the message; a field never reports
//! more than one message at a time.

use crate::report::FieldErrorReporter;
use crate::FieldValue;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for format checks
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());

/// Outcome of running a field's rule-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(&'static str),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Message for the field's error slot, empty when valid.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationResult::Valid => "",
            ValidationResult::Invalid(msg) => msg,
        }
    }
}

/// A single predicate over a field value plus the message shown when it fails.
pub struct ValidationRule {
    pub check: fn(&FieldValue) -> bool,
    pub message: &'static str,
}

const NAME_RULES: &[ValidationRule] = &[
    ValidationRule {
        check: |v| !v.text().trim().is_empty(),
        message: "Name is required",
    },
    ValidationRule {
        check: |v| v.text().trim().encode_utf16().count() >= 2,
        message: "Name must be at least 2 characters",
    },
];

const EMAIL_RULES: &[ValidationRule] = &[
    ValidationRule {
        check: |v| !v.text().trim().is_empty(),
        message: "Email is required",
    },
    ValidationRule {
        check: |v| is_valid_email(v.text()),
        message: "Please enter a valid email address",
    },
];

const PHONE_RULES: &[ValidationRule] = &[ValidationRule {
    check: |v| v.text().trim().is_empty() || is_valid_phone(v.text()),
    message: "Please enter a valid phone number",
}];

const SUBJECT_RULES: &[ValidationRule] = &[ValidationRule {
    check: |v| !v.text().is_empty(),
    message: "Please select a subject",
}];

const MESSAGE_RULES: &[ValidationRule] = &[
    ValidationRule {
        check: |v| !v.text().trim().is_empty(),
        message: "Message is required",
    },
    ValidationRule {
        check: |v| v.text().trim().encode_utf16().count() >= 10,
        message: "Message must be at least 10 characters",
    },
];

const TERMS_RULES: &[ValidationRule] = &[ValidationRule {
    check: |v| v.is_checked(),
    message: "You must agree to the terms and conditions",
}];

/// Rule-set for a field id. Unknown ids have no rules and are always valid.
pub fn rules_for(field_id: &str) -> &'static [ValidationRule] {
    match field_id {
        "name" => NAME_RULES,
        "email" => EMAIL_RULES,
        "phone" => PHONE_RULES,
        "subject" => SUBJECT_RULES,
        "message" => MESSAGE_RULES,
        "terms" => TERMS_RULES,
        _ => &[],
    }
}

/// Run the rule-set for `field_id` against `value`; first failing rule wins.
pub fn validate(field_id: &str, value: &FieldValue) -> ValidationResult {
    rules_for(field_id)
        .iter()
        .find(|rule| !(rule.check)(value))
        .map_or(ValidationResult::Valid, |rule| ValidationResult::Invalid(rule.message))
}

/// Validate every field, reporting each result through `reporter`.
///
/// All fields are evaluated even after an earlier one fails, so every invalid
/// field gets its message. Returns `true` only if every field is valid.
pub fn validate_all<'a, I, R>(fields: I, reporter: &mut R) -> bool
where
    I: IntoIterator<Item = (&'a str, &'a FieldValue)>,
    R: FieldErrorReporter + ?Sized,
{
    let mut all_valid = true;
    for (field_id, value) in fields {
        match validate(field_id, value) {
            ValidationResult::Valid => reporter.clear_error(field_id),
            ValidationResult::Invalid(msg) => {
                debug!("field '{}' failed validation: {}", field_id, msg);
                reporter.show_error(field_id, msg);
                all_valid = false;
            }
        }
    }
    all_valid
}

/// `local@domain.tld` shape check shared by the contact and newsletter forms.
pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_REGEX.is_match(raw)
}

/// Phone check on the value with all whitespace removed.
///
/// Accepts an optional leading `+`, a first digit 1-9, then up to 15 more digits.
pub fn is_valid_phone(raw: &str) -> bool {
    let compact = WHITESPACE_REGEX.replace_all(raw, "");
    PHONE_REGEX.is_match(&compact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testing::Recorder;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn valid_contact() -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", text("Al")),
            ("email", text("al@example.com")),
            ("phone", text("")),
            ("subject", text("general")),
            ("message", text("1234567890")),
            ("terms", FieldValue::Checked(true)),
        ]
    }

    #[test]
    fn email_accepts_well_formed_addresses() {
        for addr in ["a@b.c", "al@example.com", "first.last@sub.domain.org"] {
            assert_eq!(validate("email", &text(addr)), ValidationResult::Valid, "{addr}");
        }
    }

    #[test]
    fn email_rejects_missing_at_or_dot() {
        for addr in ["alexample.com", "al@examplecom", "al @example.com", "@example.com"] {
            assert_eq!(
                validate("email", &text(addr)),
                ValidationResult::Invalid("Please enter a valid email address"),
                "{addr}"
            );
        }
        assert_eq!(validate("email", &text("   ")).message(), "Email is required");
    }

    #[test]
    fn name_length_boundary() {
        assert_eq!(validate("name", &text("")).message(), "Name is required");
        assert_eq!(validate("name", &text("   ")).message(), "Name is required");
        assert_eq!(
            validate("name", &text(" A ")).message(),
            "Name must be at least 2 characters"
        );
        assert!(validate("name", &text("Al")).is_valid());
        assert!(validate("name", &text("  Zoë ")).is_valid());
    }

    #[test]
    fn lengths_count_utf16_units() {
        // One astral character is two UTF-16 code units.
        assert!(validate("name", &text("\u{1D49C}")).is_valid());
        assert!(validate("message", &text("\u{1F600}".repeat(5).as_str())).is_valid());
        assert_eq!(
            validate("message", &text("\u{1F600}".repeat(4).as_str())).message(),
            "Message must be at least 10 characters"
        );
    }

    #[test]
    fn phone_is_optional_and_keeps_exact_pattern() {
        assert!(validate("phone", &text("")).is_valid());
        assert!(validate("phone", &text("   ")).is_valid());
        assert!(validate("phone", &text("+1 555 123 4567")).is_valid());
        assert!(validate("phone", &text("1234567890123456")).is_valid());
        assert!(!validate("phone", &text("12345678901234567")).is_valid());
        assert!(!validate("phone", &text("0123")).is_valid());
        assert!(!validate("phone", &text("+")).is_valid());
        assert!(!validate("phone", &text("555-1234")).is_valid());
    }

    #[test]
    fn message_requires_ten_trimmed_characters() {
        assert_eq!(validate("message", &text("")).message(), "Message is required");
        assert_eq!(
            validate("message", &text("  short  ")).message(),
            "Message must be at least 10 characters"
        );
        assert!(validate("message", &text("1234567890")).is_valid());
    }

    #[test]
    fn subject_and_terms() {
        assert_eq!(validate("subject", &text("")).message(), "Please select a subject");
        assert!(validate("subject", &text("general")).is_valid());
        assert_eq!(
            validate("terms", &FieldValue::Checked(false)).message(),
            "You must agree to the terms and conditions"
        );
        assert!(validate("terms", &FieldValue::Checked(true)).is_valid());
    }

    #[test]
    fn unknown_field_is_always_valid() {
        assert!(validate("nickname", &text("")).is_valid());
    }

    #[test]
    fn validate_all_valid_form_shows_no_errors() {
        let fields = valid_contact();
        let mut slots = Recorder::default();
        assert!(validate_all(fields.iter().map(|(id, v)| (*id, v)), &mut slots));
        assert_eq!(slots.show_calls(), 0);
    }

    #[test]
    fn validate_all_reports_only_the_invalid_field() {
        let mut fields = valid_contact();
        fields[5].1 = FieldValue::Checked(false);
        let mut slots = Recorder::default();
        assert!(!validate_all(fields.iter().map(|(id, v)| (*id, v)), &mut slots));
        assert_eq!(slots.show_calls(), 1);
        assert_eq!(slots.message("terms"), "You must agree to the terms and conditions");
        assert_eq!(slots.message("name"), "");
    }

    #[test]
    fn validate_all_evaluates_every_field() {
        let fields = vec![
            ("name", text("")),
            ("email", text("nope")),
            ("message", text("hi")),
        ];
        let mut slots = Recorder::default();
        assert!(!validate_all(fields.iter().map(|(id, v)| (*id, v)), &mut slots));
        assert_eq!(slots.show_calls(), 3);
        assert_eq!(slots.message("email"), "Please enter a valid email address");
    }
}
