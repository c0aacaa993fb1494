use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub fn is_valid_name(raw: &str) -> bool {
    static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L} ]{2,50}$").unwrap());

    NAME.is_match(raw.trim())
}

/// Only the decimal digits are counted, so formatting like `+49 (30) 123-456` is accepted.
pub fn is_valid_phone(raw: &str) -> bool {
    let digits = raw.chars().filter(char::is_ascii_digit).count();

    (7..=15).contains(&digits)
}

/// The email is optional, hence blank input is valid.
pub fn is_valid_email(raw: &str) -> bool {
    static EMAIL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

    let raw = raw.trim();

    raw.is_empty() || EMAIL.is_match(raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Phone,
    Email,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Name, Self::Phone, Self::Email];

    pub fn validate(self, raw: &str) -> bool {
        match self {
            Self::Name => is_valid_name(raw),
            Self::Phone => is_valid_phone(raw),
            Self::Email => is_valid_email(raw),
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            Self::Name => "Name must be 2–50 letters/spaces.",
            Self::Phone => "Phone needs 7–15 digits.",
            Self::Email => "Email is invalid.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let val = match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
        };

        fmt.write_str(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn names_are_letters_and_spaces() {
        assert!(is_valid_name("Ada Lovelace"));
        assert!(is_valid_name("  Zoë Ångström "));
        assert!(is_valid_name("李雷"));

        assert!(!is_valid_name("A"));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("R2 D2"));
        assert!(!is_valid_name("O'Brien"));
        assert!(!is_valid_name(&"a".repeat(51)));
        assert!(is_valid_name(&"a".repeat(50)));
    }

    #[test]
    fn phone_formatting_is_ignored() {
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("+1 555 123 4567"));
        assert!(is_valid_phone("1234567"));

        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("123-456"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn email_is_optional() {
        assert!(is_valid_email(""));
        assert!(is_valid_email("   "));
        assert!(is_valid_email("ada@example.org"));
        assert!(is_valid_email(" ada@example.org "));

        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("@example.org"));
        assert!(!is_valid_email("ada@@example.org"));
        assert!(!is_valid_email("ada lovelace@example.org"));
    }

    #[test]
    fn fields_map_to_their_predicates() {
        assert!(Field::Name.validate("Ann"));
        assert!(!Field::Phone.validate("Ann"));
        assert!(Field::Email.validate(""));

        assert_eq!(Field::Phone.error_message(), "Phone needs 7–15 digits.");
        assert_eq!(Field::Email.to_string(), "email");
    }

    proptest! {
        #[test]
        fn phone_validity_follows_digit_count(raw in "\\PC*") {
            let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();

            prop_assert_eq!(is_valid_phone(&raw), (7..=15).contains(&digits));
        }

        #[test]
        fn embedded_whitespace_invalidates_email(
            head in "[a-z@.]{1,10}",
            space in "[ \t\u{a0}]+",
            tail in "[a-z@.]{1,10}",
        ) {
            let raw = format!("{head}{space}{tail}");

            prop_assert!(!is_valid_email(&raw));
        }
    }
}
