//! Driven port for the Tripture account API.
//!
//! The domain owns the request shapes and response contracts so the form
//! services stay adapter-agnostic. Business rejections the server reports in
//! a successful response (wrong code, duplicate account) are verdict values,
//! not errors; the error enum covers transport and protocol failures only.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::fields::{EmailAddress, ImageAttachment, Nickname, Password};

/// How the account was created, as the server records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginType {
    /// Native email/password account (wire value `SELF`).
    Native,
    /// Kakao social sign-in (wire value `KAKAO`).
    Kakao,
}

impl LoginType {
    /// Wire representation used by the account API.
    #[must_use]
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::Native => "SELF",
            Self::Kakao => "KAKAO",
        }
    }

    /// Parse the wire representation.
    #[must_use]
    pub fn from_wire_str(value: &str) -> Option<Self> {
        match value {
            "SELF" => Some(Self::Native),
            "KAKAO" => Some(Self::Kakao),
            _ => None,
        }
    }
}

/// Server verdict for an email code check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeVerdict {
    /// The entered code matches the one issued for this address.
    Confirmed,
    /// The server rejected the code; the message is the server's, verbatim.
    Rejected {
        /// Rejection text reported by the server.
        message: String,
    },
}

/// Server verdict for a signup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpVerdict {
    /// The account was created.
    Registered,
    /// The server declined the registration (duplicate email, duplicate
    /// nickname, policy failure); the message is the server's, verbatim.
    Rejected {
        /// Rejection text reported by the server.
        message: String,
    },
}

/// Aggregate submitted by the signup flow once every gate has passed.
#[derive(Debug, Clone)]
pub struct SignUpSubmission {
    /// Verified login email.
    pub login_email: EmailAddress,
    /// Validated password.
    pub password: Password,
    /// Chosen display nickname.
    pub nickname: Nickname,
    /// Account provenance; always [`LoginType::Native`] for this flow.
    pub login_type: LoginType,
    /// Optional profile image.
    pub image: Option<ImageAttachment>,
    /// Whether the email code was confirmed before submission.
    pub email_auth_check: bool,
}

/// Aggregate submitted by the profile-edit flow.
///
/// `None` fields mean "leave unchanged"; the adapter owns how that maps onto
/// the wire.
#[derive(Debug, Clone)]
pub struct ProfileEditSubmission {
    /// Replacement nickname, when the user changed it.
    pub nickname: Option<Nickname>,
    /// Replacement password, when the user completed a password change.
    pub password: Option<Password>,
    /// Replacement profile image, when the user picked one.
    pub image: Option<ImageAttachment>,
}

/// Profile snapshot served when the edit screen opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    /// Current display nickname.
    pub nickname: String,
    /// Login email (read-only on the edit screen).
    pub login_email: EmailAddress,
    /// Account provenance; gates whether a password change is offered.
    pub login_type: LoginType,
    /// Current profile image name, when one is set.
    pub image_name: Option<String>,
}

/// Profile fields returned by a successful edit.
///
/// This is an explicit return value: callers that cache profile data apply
/// it themselves; the crate never writes to a shared store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSnapshot {
    /// Nickname after the edit.
    pub nickname: String,
    /// Profile image name after the edit, when one is set.
    pub image_name: Option<String>,
}

define_port_error! {
    /// Errors surfaced while calling the account API.
    pub enum AccountGatewayError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "account api transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "account api timeout: {message}",
        /// The response could not be decoded.
        Decode { message: String } =>
            "account api response decode failed: {message}",
        /// The server rejected the request shape (4xx).
        InvalidRequest { message: String } =>
            "account api rejected request: {message}",
        /// The server failed to serve the request (5xx).
        Upstream { message: String } =>
            "account api upstream failure: {message}",
    }
}

/// Port for the remote account operations behind the two form flows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Ask the server to email a one-time verification code.
    async fn send_email_code(&self, email: &EmailAddress) -> Result<(), AccountGatewayError>;

    /// Ask the server to check an entered code against the issued one.
    async fn check_email_code(
        &self,
        email: &EmailAddress,
        code: &str,
    ) -> Result<CodeVerdict, AccountGatewayError>;

    /// Create an account from a gated signup submission.
    async fn sign_up(
        &self,
        submission: &SignUpSubmission,
    ) -> Result<SignUpVerdict, AccountGatewayError>;

    /// Fetch the current profile for the edit screen.
    async fn fetch_profile_form(&self) -> Result<ProfileForm, AccountGatewayError>;

    /// Apply a profile edit and return the resulting snapshot.
    async fn edit_profile(
        &self,
        submission: &ProfileEditSubmission,
    ) -> Result<ProfileSnapshot, AccountGatewayError>;
}

/// Fixture implementation that accepts everything.
///
/// Useful for wiring tests that exercise form state without asserting on
/// gateway traffic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAccountGateway;

#[async_trait]
impl AccountGateway for FixtureAccountGateway {
    async fn send_email_code(&self, _email: &EmailAddress) -> Result<(), AccountGatewayError> {
        Ok(())
    }

    async fn check_email_code(
        &self,
        _email: &EmailAddress,
        _code: &str,
    ) -> Result<CodeVerdict, AccountGatewayError> {
        Ok(CodeVerdict::Confirmed)
    }

    async fn sign_up(
        &self,
        _submission: &SignUpSubmission,
    ) -> Result<SignUpVerdict, AccountGatewayError> {
        Ok(SignUpVerdict::Registered)
    }

    async fn fetch_profile_form(&self) -> Result<ProfileForm, AccountGatewayError> {
        let login_email = EmailAddress::new("fixture@tripture.app")
            .map_err(|err| AccountGatewayError::decode(err.to_string()))?;
        Ok(ProfileForm {
            nickname: "fixture".to_owned(),
            login_email,
            login_type: LoginType::Native,
            image_name: None,
        })
    }

    async fn edit_profile(
        &self,
        submission: &ProfileEditSubmission,
    ) -> Result<ProfileSnapshot, AccountGatewayError> {
        Ok(ProfileSnapshot {
            nickname: submission
                .nickname
                .as_ref()
                .map_or_else(|| "fixture".to_owned(), |nickname| nickname.to_string()),
            image_name: submission
                .image
                .as_ref()
                .map(|image| image.file_name().to_owned()),
        })
    }
}
