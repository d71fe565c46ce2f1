//! Pure field validation primitives for Tripture account forms.
//!
//! Everything here is side-effect free: predicate functions over raw field
//! input, the tri-state [`Validity`] verdict, and [`TrackedField`] which pairs
//! one field value with its verdict. Forms re-evaluate synchronously on every
//! edit; nothing in this crate performs I/O.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 8;

/// Symbols a password may (and must, at least once) contain.
pub const PASSWORD_SYMBOLS: &str = "$@!%*#?&";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,4}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

static PASSWORD_ALPHABET_RE: OnceLock<Regex> = OnceLock::new();

fn password_alphabet_regex() -> &'static Regex {
    PASSWORD_ALPHABET_RE.get_or_init(|| {
        // Length and character classes are enforced separately; this regex
        // constrains the permitted alphabet.
        let pattern = r"^[A-Za-z0-9$@!%*#?&]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("password alphabet regex failed to compile: {error}"))
    })
}

/// Check an email address: `local@domain.tld` with local part in
/// `[A-Za-z0-9._-]`, domain in `[A-Za-z0-9.-]`, and an alphabetic TLD of two
/// to four characters.
///
/// # Examples
/// ```
/// use validation::email_format_ok;
///
/// assert!(email_format_ok("a@b.co"));
/// assert!(!email_format_ok("not-an-address"));
/// ```
#[must_use]
pub fn email_format_ok(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Check a password: at least [`PASSWORD_MIN`] characters drawn only from
/// letters, digits, and [`PASSWORD_SYMBOLS`], with at least one of each
/// class present.
///
/// # Examples
/// ```
/// use validation::password_format_ok;
///
/// assert!(password_format_ok("Abcdef1!"));
/// assert!(!password_format_ok("abcdefgh"));
/// ```
#[must_use]
pub fn password_format_ok(value: &str) -> bool {
    if value.chars().count() < PASSWORD_MIN {
        return false;
    }
    if !password_alphabet_regex().is_match(value) {
        return false;
    }
    let has_letter = value.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_symbol = value.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
    has_letter && has_digit && has_symbol
}

/// Check that a password confirmation matches the password exactly.
#[must_use]
pub fn passwords_match(password: &str, confirm: &str) -> bool {
    password == confirm
}

/// Tri-state validation verdict for one form field.
///
/// A field is [`Validity::Unknown`] until its value has been non-empty at
/// least once; after that it is [`Validity::Valid`] or [`Validity::Invalid`]
/// according to the last evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// The field has not been evaluated yet.
    #[default]
    Unknown,
    /// The last evaluation passed.
    Valid,
    /// The last evaluation failed.
    Invalid,
}

impl Validity {
    /// Map a predicate outcome onto a verdict.
    #[must_use]
    pub const fn from_check(ok: bool) -> Self {
        if ok { Self::Valid } else { Self::Invalid }
    }

    /// Whether the last evaluation passed.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Whether the last evaluation failed.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid)
    }
}

/// One form field value together with its validation verdict.
///
/// [`TrackedField::set`] overwrites the value on every edit and re-evaluates
/// the supplied predicate synchronously, preserving the invariant that the
/// verdict stays [`Validity::Unknown`] until the value has been non-empty at
/// least once. Clearing the field afterwards retains the last verdict, so
/// inline feedback does not flicker back to neutral while the user deletes
/// text.
///
/// # Examples
/// ```
/// use validation::{email_format_ok, TrackedField, Validity};
///
/// let mut email = TrackedField::new();
/// assert_eq!(email.validity(), Validity::Unknown);
///
/// email.set("a@b", email_format_ok);
/// assert_eq!(email.validity(), Validity::Invalid);
///
/// email.set("a@b.co", email_format_ok);
/// assert!(email.validity().is_valid());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedField {
    value: String,
    validity: Validity,
}

impl TrackedField {
    /// Create an empty, unevaluated field.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: String::new(),
            validity: Validity::Unknown,
        }
    }

    /// Overwrite the field value and re-evaluate `check` when it is
    /// non-empty.
    pub fn set(&mut self, value: impl Into<String>, check: impl Fn(&str) -> bool) {
        self.value = value.into();
        if !self.value.is_empty() {
            self.validity = Validity::from_check(check(&self.value));
        }
    }

    /// Current raw field value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Current validation verdict.
    #[must_use]
    pub const fn validity(&self) -> Validity {
        self.validity
    }

    /// Whether the field currently holds a valid value.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@b.co")]
    #[case("user.name@example.com")]
    #[case("under_score@host.org")]
    #[case("dash-ed@sub.domain.net")]
    #[case("digits123@host99.info")]
    fn accepts_well_formed_emails(#[case] value: &str) {
        assert!(email_format_ok(value), "{value} should validate");
    }

    #[rstest]
    #[case("")]
    #[case("plainaddress")]
    #[case("missing-domain@")]
    #[case("@missing-local.tld")]
    #[case("no-tld@host")]
    #[case("long-tld@host.toolong")]
    #[case("spaces in@local.com")]
    fn rejects_malformed_emails(#[case] value: &str) {
        assert!(!email_format_ok(value), "{value} should be rejected");
    }

    #[rstest]
    #[case("Abcdef1!")]
    #[case("pass@word9")]
    #[case("A1$A1$A1")]
    fn accepts_conforming_passwords(#[case] value: &str) {
        assert!(password_format_ok(value), "{value} should validate");
    }

    #[rstest]
    #[case::too_short("Ab1!")]
    #[case::no_digit_or_symbol("abcdefgh")]
    #[case::no_symbol("abcdefg1")]
    #[case::no_digit("abcdefg!")]
    #[case::no_letter("12345678$")]
    #[case::forbidden_character("Abcdef1^")]
    fn rejects_nonconforming_passwords(#[case] value: &str) {
        assert!(!password_format_ok(value), "{value} should be rejected");
    }

    #[test]
    fn short_inputs_never_validate_as_passwords() {
        for len in 0..PASSWORD_MIN {
            let value = "A1$".repeat(len).chars().take(len).collect::<String>();
            assert!(!password_format_ok(&value), "length {len} should fail");
        }
    }

    #[rstest]
    #[case("Abcdef1!", "Abcdef1!", true)]
    #[case("Abcdef1!", "abcdef1!", false)]
    #[case("Abcdef1!", "", false)]
    fn confirmation_requires_exact_equality(
        #[case] password: &str,
        #[case] confirm: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(passwords_match(password, confirm), expected);
    }

    #[test]
    fn tracked_field_stays_unknown_until_first_nonempty_input() {
        let mut field = TrackedField::new();
        field.set("", email_format_ok);
        assert_eq!(field.validity(), Validity::Unknown);

        field.set("a@b.co", email_format_ok);
        assert_eq!(field.validity(), Validity::Valid);
    }

    #[test]
    fn tracked_field_retains_last_verdict_after_clearing() {
        let mut field = TrackedField::new();
        field.set("broken", email_format_ok);
        assert_eq!(field.validity(), Validity::Invalid);

        field.set("", email_format_ok);
        assert_eq!(field.value(), "");
        assert_eq!(field.validity(), Validity::Invalid);
    }

    #[test]
    fn tracked_field_reevaluates_on_every_edit() {
        let mut field = TrackedField::new();
        field.set("a@b.co", email_format_ok);
        assert!(field.is_valid());

        field.set("a@b", email_format_ok);
        assert!(field.validity().is_invalid());
    }
}
