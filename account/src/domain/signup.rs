//! Signup form state and submission flow.
//!
//! [`SignUpForm`] owns the field values, their verdicts, the email
//! verification machine, and the submission phase for one screen instance.
//! [`SignUpService`] drives the three remote steps (send code, check code,
//! submit) against an [`AccountGateway`], gating each one locally first so an
//! invalid form never reaches the network.

use std::sync::Arc;

use validation::{TrackedField, Validity, email_format_ok, password_format_ok, passwords_match};

use crate::domain::error::Error;
use crate::domain::FlowResult;
use crate::domain::fields::{
    EmailAddress, FieldValidationError, ImageAttachment, Nickname, Password, SecretField,
};
use crate::domain::ports::{AccountGateway, CodeVerdict, LoginType, SignUpSubmission, SignUpVerdict};
use crate::domain::verification::EmailVerification;

/// Single aggregate message shown when the submit gate fails; it does not
/// enumerate which field failed.
const GATE_MESSAGE: &str = "fill in every signup field in the expected format before submitting";

const IN_FLIGHT_MESSAGE: &str = "another call is in flight for this form";

const CODE_REQUIRED_MESSAGE: &str = "enter the verification code sent to your email";

const EMAIL_REQUIRED_MESSAGE: &str =
    "enter a valid email address first (e.g. username@example.com)";

/// Lifecycle of one submission attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// No submission in flight.
    #[default]
    Idle,
    /// The create call is in flight.
    Submitting,
    /// The server accepted the registration.
    Succeeded,
    /// The last attempt failed; any edit returns the form to
    /// [`SubmissionPhase::Idle`].
    Failed,
}

/// In-memory state of the signup screen.
///
/// Dropped (and password buffers wiped) when the screen unmounts; nothing is
/// persisted across sessions.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    nickname: String,
    email: TrackedField,
    code: String,
    password: SecretField,
    confirm: SecretField,
    image: Option<ImageAttachment>,
    verification: EmailVerification,
    phase: SubmissionPhase,
    busy: bool,
}

impl SignUpForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the nickname field.
    pub fn set_nickname(&mut self, value: impl Into<String>) {
        self.reset_failed_phase();
        self.nickname = value.into();
    }

    /// Overwrite the email field, re-evaluating its format.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.reset_failed_phase();
        self.email.set(value, email_format_ok);
    }

    /// Overwrite the verification code field.
    pub fn set_code(&mut self, value: impl Into<String>) {
        self.reset_failed_phase();
        self.code = value.into();
    }

    /// Overwrite the password field, re-evaluating the password rule.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.reset_failed_phase();
        self.password.set(value, password_format_ok);
    }

    /// Overwrite the confirmation field, re-evaluating equality against the
    /// current password.
    ///
    /// The verdict refreshes when the confirmation is edited, not when the
    /// password is; inline feedback tracks the field the user is typing in.
    pub fn set_password_confirm(&mut self, value: impl Into<String>) {
        self.reset_failed_phase();
        let value = value.into();
        let ok = passwords_match(self.password.value(), &value);
        self.confirm.set(value, |_| ok);
    }

    /// Stage or clear the optional profile image.
    pub fn set_image(&mut self, image: Option<ImageAttachment>) {
        self.reset_failed_phase();
        self.image = image;
    }

    /// Current nickname input.
    #[must_use]
    pub fn nickname(&self) -> &str {
        self.nickname.as_str()
    }

    /// Current email input.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.value()
    }

    /// Verdict on the email field.
    #[must_use]
    pub const fn email_validity(&self) -> Validity {
        self.email.validity()
    }

    /// Verdict on the password field.
    #[must_use]
    pub const fn password_validity(&self) -> Validity {
        self.password.validity()
    }

    /// Verdict on the confirmation field.
    #[must_use]
    pub const fn confirm_validity(&self) -> Validity {
        self.confirm.validity()
    }

    /// State of the email verification code.
    #[must_use]
    pub const fn verification(&self) -> &EmailVerification {
        &self.verification
    }

    /// Current submission phase.
    #[must_use]
    pub const fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Whether a remote call is in flight for this form.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    fn reset_failed_phase(&mut self) {
        if self.phase == SubmissionPhase::Failed {
            self.phase = SubmissionPhase::Idle;
        }
    }

    fn gate_passes(&self) -> bool {
        self.email.is_valid()
            && !self.nickname.trim().is_empty()
            && self.password.is_valid()
            && self.verification.is_confirmed()
    }

    #[cfg(test)]
    pub(crate) fn mark_in_flight(&mut self) {
        self.busy = true;
    }
}

/// Drives the signup flow against an [`AccountGateway`].
#[derive(Clone)]
pub struct SignUpService<G> {
    gateway: Arc<G>,
}

impl<G> SignUpService<G> {
    /// Create a service with the given gateway.
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

fn invariant_failure(err: FieldValidationError) -> Error {
    Error::internal(format!("gated field failed validation: {err}"))
}

impl<G> SignUpService<G>
where
    G: AccountGateway,
{
    /// Ask the server to email a verification code to the entered address.
    ///
    /// The remote send is never invoked while the email field is not valid.
    pub async fn request_code(&self, form: &mut SignUpForm) -> FlowResult<()> {
        if form.busy {
            return Err(Error::busy(IN_FLIGHT_MESSAGE));
        }
        if !form.email.is_valid() {
            return Err(Error::validation(EMAIL_REQUIRED_MESSAGE));
        }
        let email = EmailAddress::new(form.email.value()).map_err(invariant_failure)?;

        form.busy = true;
        let result = self.gateway.send_email_code(&email).await;
        form.busy = false;

        match result {
            Ok(()) => {
                form.verification.mark_requested();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "email code request failed");
                Err(Error::verification(err.to_string()))
            }
        }
    }

    /// Check the entered code with the server.
    ///
    /// An empty code fails locally without a remote call. A server rejection
    /// moves the verification machine to rejected and surfaces the server
    /// message verbatim.
    pub async fn confirm_code(&self, form: &mut SignUpForm) -> FlowResult<()> {
        if form.busy {
            return Err(Error::busy(IN_FLIGHT_MESSAGE));
        }
        if form.code.trim().is_empty() {
            return Err(Error::validation(CODE_REQUIRED_MESSAGE));
        }
        if !form.email.is_valid() {
            return Err(Error::validation(EMAIL_REQUIRED_MESSAGE));
        }
        let email = EmailAddress::new(form.email.value()).map_err(invariant_failure)?;

        form.busy = true;
        let result = self.gateway.check_email_code(&email, form.code.as_str()).await;
        form.busy = false;

        match result {
            Ok(CodeVerdict::Confirmed) => {
                form.verification.confirm();
                Ok(())
            }
            Ok(CodeVerdict::Rejected { message }) => {
                form.verification.reject(message.clone());
                Err(Error::verification(message))
            }
            Err(err) => Err(Error::verification(err.to_string())),
        }
    }

    /// Submit the signup once every gate passes.
    ///
    /// The gate requires a valid email, a non-empty nickname, a valid
    /// password, and a confirmed email code; any failure surfaces one
    /// aggregate validation error and the create call is never made. While a
    /// call is in flight a second submit fails fast with a busy error.
    pub async fn submit(&self, form: &mut SignUpForm) -> FlowResult<()> {
        if form.busy {
            return Err(Error::busy(IN_FLIGHT_MESSAGE));
        }
        if !form.gate_passes() {
            tracing::warn!("signup submission blocked by the local gate");
            return Err(Error::validation(GATE_MESSAGE));
        }

        let submission = SignUpSubmission {
            login_email: EmailAddress::new(form.email.value()).map_err(invariant_failure)?,
            password: Password::new(form.password.value()).map_err(invariant_failure)?,
            nickname: Nickname::new(form.nickname.as_str()).map_err(invariant_failure)?,
            login_type: LoginType::Native,
            image: form.image.clone(),
            email_auth_check: form.verification.is_confirmed(),
        };

        form.busy = true;
        form.phase = SubmissionPhase::Submitting;
        let result = self.gateway.sign_up(&submission).await;
        form.busy = false;

        match result {
            Ok(SignUpVerdict::Registered) => {
                form.phase = SubmissionPhase::Succeeded;
                Ok(())
            }
            Ok(SignUpVerdict::Rejected { message }) => {
                form.phase = SubmissionPhase::Failed;
                tracing::warn!(message = %message, "signup rejected by the server");
                Err(Error::submission(message))
            }
            Err(err) => {
                form.phase = SubmissionPhase::Failed;
                Err(Error::submission(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{AccountGatewayError, MockAccountGateway};

    fn make_service(gateway: MockAccountGateway) -> SignUpService<MockAccountGateway> {
        SignUpService::new(Arc::new(gateway))
    }

    fn filled_form() -> SignUpForm {
        let mut form = SignUpForm::new();
        form.set_nickname("trip");
        form.set_email("a@b.co");
        form.set_password("Abcdef1!");
        form.set_password_confirm("Abcdef1!");
        form.set_code("4821");
        form
    }

    #[tokio::test]
    async fn request_code_never_calls_gateway_for_invalid_email() {
        let mut gateway = MockAccountGateway::new();
        gateway.expect_send_email_code().times(0);

        let service = make_service(gateway);
        let mut form = SignUpForm::new();
        form.set_email("broken");

        let error = service.request_code(&mut form).await.expect_err("gate");
        assert_eq!(error.code(), ErrorCode::Validation);
        assert_eq!(form.verification(), &EmailVerification::NotRequested);
    }

    #[tokio::test]
    async fn request_code_transitions_to_requested() {
        let mut gateway = MockAccountGateway::new();
        gateway
            .expect_send_email_code()
            .withf(|email: &EmailAddress| email.as_str() == "a@b.co")
            .times(1)
            .return_once(|_| Ok(()));

        let service = make_service(gateway);
        let mut form = SignUpForm::new();
        form.set_email("a@b.co");

        service.request_code(&mut form).await.expect("send succeeds");
        assert_eq!(form.verification(), &EmailVerification::Requested);
    }

    #[tokio::test]
    async fn confirm_code_requires_a_code() {
        let mut gateway = MockAccountGateway::new();
        gateway.expect_check_email_code().times(0);

        let service = make_service(gateway);
        let mut form = SignUpForm::new();
        form.set_email("a@b.co");

        let error = service.confirm_code(&mut form).await.expect_err("gate");
        assert_eq!(error.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn rejected_code_surfaces_server_message_verbatim() {
        let mut gateway = MockAccountGateway::new();
        gateway
            .expect_check_email_code()
            .times(1)
            .return_once(|_, _| {
                Ok(CodeVerdict::Rejected {
                    message: "인증번호가 맞지 않습니다.".to_owned(),
                })
            });

        let service = make_service(gateway);
        let mut form = SignUpForm::new();
        form.set_email("a@b.co");
        form.set_code("0000");

        let error = service.confirm_code(&mut form).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Verification);
        assert_eq!(error.message(), "인증번호가 맞지 않습니다.");
        assert_eq!(
            form.verification().rejection_message(),
            Some("인증번호가 맞지 않습니다.")
        );
    }

    #[tokio::test]
    async fn submit_never_calls_gateway_while_code_unconfirmed() {
        let mut gateway = MockAccountGateway::new();
        gateway.expect_sign_up().times(0);

        let service = make_service(gateway);
        let mut form = filled_form();

        let error = service.submit(&mut form).await.expect_err("gate");
        assert_eq!(error.code(), ErrorCode::Validation);
        assert_eq!(form.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn submit_surfaces_one_aggregate_message() {
        let mut gateway = MockAccountGateway::new();
        gateway.expect_sign_up().times(0);

        let service = make_service(gateway);
        let mut form = SignUpForm::new();
        form.set_nickname("trip");

        let error = service.submit(&mut form).await.expect_err("gate");
        assert_eq!(error.message(), GATE_MESSAGE);
    }

    #[tokio::test]
    async fn confirmed_form_fires_exactly_one_signup_call() {
        let mut gateway = MockAccountGateway::new();
        gateway
            .expect_check_email_code()
            .times(1)
            .return_once(|_, _| Ok(CodeVerdict::Confirmed));
        gateway
            .expect_sign_up()
            .withf(|submission: &SignUpSubmission| {
                submission.login_email.as_str() == "a@b.co"
                    && submission.nickname.as_str() == "trip"
                    && submission.password.expose() == "Abcdef1!"
                    && submission.login_type == LoginType::Native
                    && submission.email_auth_check
            })
            .times(1)
            .return_once(|_| Ok(SignUpVerdict::Registered));

        let service = make_service(gateway);
        let mut form = filled_form();

        service.confirm_code(&mut form).await.expect("code confirmed");
        service.submit(&mut form).await.expect("signup succeeds");
        assert_eq!(form.phase(), SubmissionPhase::Succeeded);
    }

    #[tokio::test]
    async fn server_rejection_fails_the_attempt_and_edit_resets_phase() {
        let mut gateway = MockAccountGateway::new();
        gateway
            .expect_check_email_code()
            .times(1)
            .return_once(|_, _| Ok(CodeVerdict::Confirmed));
        gateway.expect_sign_up().times(1).return_once(|_| {
            Ok(SignUpVerdict::Rejected {
                message: "duplicate nickname".to_owned(),
            })
        });

        let service = make_service(gateway);
        let mut form = filled_form();
        service.confirm_code(&mut form).await.expect("code confirmed");

        let error = service.submit(&mut form).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Submission);
        assert_eq!(error.message(), "duplicate nickname");
        assert_eq!(form.phase(), SubmissionPhase::Failed);

        form.set_nickname("trip2");
        assert_eq!(form.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn transport_failure_is_a_submission_error() {
        let mut gateway = MockAccountGateway::new();
        gateway
            .expect_check_email_code()
            .times(1)
            .return_once(|_, _| Ok(CodeVerdict::Confirmed));
        gateway
            .expect_sign_up()
            .times(1)
            .return_once(|_| Err(AccountGatewayError::timeout("deadline elapsed")));

        let service = make_service(gateway);
        let mut form = filled_form();
        service.confirm_code(&mut form).await.expect("code confirmed");

        let error = service.submit(&mut form).await.expect_err("transport");
        assert_eq!(error.code(), ErrorCode::Submission);
        assert_eq!(form.phase(), SubmissionPhase::Failed);
    }

    #[tokio::test]
    async fn in_flight_calls_reject_reentry() {
        let mut gateway = MockAccountGateway::new();
        gateway.expect_sign_up().times(0);
        gateway.expect_send_email_code().times(0);

        let service = make_service(gateway);
        let mut form = filled_form();
        form.mark_in_flight();

        let error = service.submit(&mut form).await.expect_err("guard");
        assert_eq!(error.code(), ErrorCode::Busy);

        let error = service.request_code(&mut form).await.expect_err("guard");
        assert_eq!(error.code(), ErrorCode::Busy);
    }

    #[test]
    fn confirmation_verdict_refreshes_only_on_confirmation_edits() {
        let mut form = SignUpForm::new();
        form.set_password("Abcdef1!");
        form.set_password_confirm("Abcdef1!");
        assert!(form.confirm_validity().is_valid());

        // Editing the password afterwards does not refresh the verdict until
        // the confirmation itself changes.
        form.set_password("Changed1!");
        assert!(form.confirm_validity().is_valid());
        form.set_password_confirm("Abcdef1!");
        assert!(form.confirm_validity().is_invalid());
    }
}
