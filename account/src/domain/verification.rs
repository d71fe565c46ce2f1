//! Email verification code lifecycle.
//!
//! One machine per form instance. The happy path is
//! `NotRequested → Requested → Confirmed`; a failed code check moves to
//! `Rejected`, which loops back to `Requested` when the user re-requests a
//! code. There is no automatic retry anywhere: every transition is driven by
//! an explicit user action.

use serde::{Deserialize, Serialize};

/// State of the one-time email verification code for a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum EmailVerification {
    /// No code has been requested yet.
    #[default]
    NotRequested,
    /// A code was sent and is awaiting confirmation.
    Requested,
    /// The server confirmed the entered code.
    Confirmed,
    /// The server rejected the entered code; the message is the server's,
    /// verbatim.
    Rejected {
        /// Rejection text reported by the server.
        message: String,
    },
}

impl EmailVerification {
    /// Record that a code was (re)sent.
    ///
    /// Looping from [`EmailVerification::Rejected`] back to `Requested` is
    /// the supported recovery path. A machine that already reached
    /// `Confirmed` stays confirmed; re-sending a code cannot revoke a
    /// completed verification.
    pub fn mark_requested(&mut self) {
        if !self.is_confirmed() {
            *self = Self::Requested;
        }
    }

    /// Record a confirmed code check.
    pub fn confirm(&mut self) {
        *self = Self::Confirmed;
    }

    /// Record a rejected code check with the server's message.
    pub fn reject(&mut self, message: impl Into<String>) {
        *self = Self::Rejected {
            message: message.into(),
        };
    }

    /// Whether the server has confirmed the code.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Server-provided rejection message, when rejected.
    #[must_use]
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn happy_path_reaches_confirmed() {
        let mut verification = EmailVerification::default();
        assert_eq!(verification, EmailVerification::NotRequested);

        verification.mark_requested();
        assert_eq!(verification, EmailVerification::Requested);

        verification.confirm();
        assert!(verification.is_confirmed());
    }

    #[test]
    fn rejection_keeps_server_message_verbatim() {
        let mut verification = EmailVerification::Requested;
        verification.reject("인증번호가 맞지 않습니다.");
        assert_eq!(
            verification.rejection_message(),
            Some("인증번호가 맞지 않습니다.")
        );
    }

    #[test]
    fn rejected_loops_back_to_requested_on_resend() {
        let mut verification = EmailVerification::Requested;
        verification.reject("mismatch");
        verification.mark_requested();
        assert_eq!(verification, EmailVerification::Requested);
    }

    #[test]
    fn resend_cannot_revoke_a_confirmation() {
        let mut verification = EmailVerification::Confirmed;
        verification.mark_requested();
        assert!(verification.is_confirmed());
    }
}
