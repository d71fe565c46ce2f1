//! Validated form field types.
//!
//! Keep raw input parsing at the form edge by exposing constructors that
//! validate string inputs before anything talks to a port. Password material
//! lives in zeroizing buffers so it is wiped when a form is dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use validation::{Validity, email_format_ok, password_format_ok};

/// Domain error returned when a field value fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    /// Email did not match the accepted `local@domain.tld` shape.
    InvalidEmail,
    /// Nickname was missing or blank once trimmed.
    EmptyNickname,
    /// Password did not satisfy the length/character-class rule.
    InvalidPassword,
    /// Attachment file name was empty.
    EmptyFileName,
    /// Attachment MIME type was empty.
    EmptyMimeType,
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must look like username@example.com"),
            Self::EmptyNickname => write!(f, "nickname must not be empty"),
            Self::InvalidPassword => write!(
                f,
                "password needs at least 8 characters including a letter, a digit, and a symbol",
            ),
            Self::EmptyFileName => write!(f, "attachment file name must not be empty"),
            Self::EmptyMimeType => write!(f, "attachment MIME type must not be empty"),
        }
    }
}

impl std::error::Error for FieldValidationError {}

/// Validated login email address.
///
/// # Examples
/// ```
/// use account::domain::EmailAddress;
///
/// let email = EmailAddress::new("a@b.co").expect("valid address");
/// assert_eq!(email.as_str(), "a@b.co");
/// assert!(EmailAddress::new("not-an-address").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, FieldValidationError> {
        let value = value.into();
        if !email_format_ok(&value) {
            return Err(FieldValidationError::InvalidEmail);
        }
        Ok(Self(value))
    }

    /// Borrow the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = FieldValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display nickname chosen by the user.
///
/// ## Invariants
/// - Trimmed and non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    /// Validate and construct a [`Nickname`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        let normalized = value.as_ref().trim();
        if normalized.is_empty() {
            return Err(FieldValidationError::EmptyNickname);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Borrow the nickname as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Nickname> for String {
    fn from(value: Nickname) -> Self {
        value.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = FieldValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated password held in a zeroizing buffer.
///
/// Deliberately not serialisable; the outbound adapter reads it once when
/// encoding a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, FieldValidationError> {
        let value = value.into();
        if !password_format_ok(&value) {
            return Err(FieldValidationError::InvalidPassword);
        }
        Ok(Self(Zeroizing::new(value)))
    }

    /// Borrow the password for wire encoding.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

/// One form field whose raw value must be wiped on drop.
///
/// Mirrors [`validation::TrackedField`] (same non-empty-once evaluation rule)
/// but keeps the value in a zeroizing buffer, so password and
/// password-confirmation input never lingers in freed memory.
#[derive(Debug, Clone, Default)]
pub struct SecretField {
    value: Zeroizing<String>,
    validity: Validity,
}

impl SecretField {
    /// Create an empty, unevaluated field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the field value and re-evaluate `check` when it is
    /// non-empty.
    pub fn set(&mut self, value: impl Into<String>, check: impl Fn(&str) -> bool) {
        self.value = Zeroizing::new(value.into());
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

/// Image file staged for a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl ImageAttachment {
    /// Validate and construct an attachment from picked-image metadata.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, FieldValidationError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(FieldValidationError::EmptyFileName);
        }
        let mime_type = mime_type.into();
        if mime_type.trim().is_empty() {
            return Err(FieldValidationError::EmptyMimeType);
        }
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// File name sent as the multipart part name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// MIME type of the file content.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        self.mime_type.as_str()
    }

    /// Raw file content.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}
