//! Reqwest-backed account API adapter.
//!
//! This adapter owns transport details only: multipart/form encoding,
//! timeout and HTTP error mapping, and decoding of the API's mixed
//! plain-text and JSON response bodies into domain contracts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use url::Url;

use super::dto::{ProfileEditFormDto, ProfileEditResultDto};
use super::error_mapping::{body_preview, map_status_error, map_transport_error};
use crate::domain::fields::{EmailAddress, ImageAttachment};
use crate::domain::ports::{
    AccountGateway, AccountGatewayError, CodeVerdict, ProfileEditSubmission, ProfileForm,
    ProfileSnapshot, SignUpSubmission, SignUpVerdict,
};

const DEFAULT_USER_AGENT: &str = "tripture-client/0.1";

/// Body the server answers with when a code check passes.
const CODE_ACCEPTED_BODY: &str = "true";

/// Body the server answers with when a registration is created.
const REGISTER_SUCCESS_BODY: &str = "User register success";

const SEND_CODE_PATH: &str = "emailAuthSend";
const CHECK_CODE_PATH: &str = "emailAuthCheck";
const SIGN_UP_PATH: &str = "signUp";
const PROFILE_FORM_PATH: &str = "profileEditForm";
const PROFILE_EDIT_PATH: &str = "profileEdit";

/// Outbound identity settings for account API requests.
pub struct AccountHttpIdentity {
    /// HTTP user-agent sent with every request.
    pub user_agent: String,
}

impl Default for AccountHttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Account gateway adapter performing HTTP requests against one base URL.
pub struct HttpAccountGateway {
    client: Client,
    base: Url,
    user_agent: String,
}

impl HttpAccountGateway {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// The base URL must end with a trailing slash so endpoint names join
    /// onto it rather than replacing its final path segment.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_identity(base, timeout, AccountHttpIdentity::default())
    }

    /// Build an adapter with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        base: Url,
        timeout: Duration,
        identity: AccountHttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            user_agent: identity.user_agent,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AccountGatewayError> {
        self.base.join(path).map_err(|error| {
            AccountGatewayError::invalid_request(format!("endpoint {path} is not joinable: {error}"))
        })
    }

    async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, AccountGatewayError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_account_transport)?;
        if !status.is_success() {
            return Err(map_status_error(
                status,
                body.as_ref(),
                AccountGatewayError::timeout,
                AccountGatewayError::invalid_request,
                AccountGatewayError::upstream,
            ));
        }
        Ok(body.to_vec())
    }
}

fn map_account_transport(error: reqwest::Error) -> AccountGatewayError {
    map_transport_error(
        &error,
        AccountGatewayError::timeout,
        AccountGatewayError::transport,
    )
}

fn attachment_part(image: &ImageAttachment) -> Result<multipart::Part, AccountGatewayError> {
    multipart::Part::bytes(image.bytes().to_vec())
        .file_name(image.file_name().to_owned())
        .mime_str(image.mime_type())
        .map_err(|error| {
            AccountGatewayError::invalid_request(format!(
                "attachment {} has an unusable MIME type: {error}",
                image.file_name()
            ))
        })
}

fn parse_code_verdict(body: &[u8]) -> CodeVerdict {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed == CODE_ACCEPTED_BODY {
        CodeVerdict::Confirmed
    } else {
        CodeVerdict::Rejected {
            message: rejection_message(trimmed, "the verification code was not accepted"),
        }
    }
}

fn parse_sign_up_verdict(body: &[u8]) -> SignUpVerdict {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed == REGISTER_SUCCESS_BODY {
        SignUpVerdict::Registered
    } else {
        SignUpVerdict::Rejected {
            message: rejection_message(trimmed, "the registration was not accepted"),
        }
    }
}

// Rejection messages travel into domain errors whose constructors require
// non-blank text.
fn rejection_message(body: &str, fallback: &str) -> String {
    if body.trim().is_empty() {
        fallback.to_owned()
    } else {
        body.to_owned()
    }
}

#[async_trait]
impl AccountGateway for HttpAccountGateway {
    async fn send_email_code(&self, email: &EmailAddress) -> Result<(), AccountGatewayError> {
        let endpoint = self.endpoint(SEND_CODE_PATH)?;
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .form(&[("loginEmail", email.as_str())])
            .send()
            .await
            .map_err(map_account_transport)?;

        let body = Self::read_body(response).await?;
        let text = String::from_utf8_lossy(&body);
        if text.trim() == "true" {
            Ok(())
        } else {
            Err(AccountGatewayError::upstream(format!(
                "code delivery was not accepted: {}",
                body_preview(&body)
            )))
        }
    }

    async fn check_email_code(
        &self,
        email: &EmailAddress,
        code: &str,
    ) -> Result<CodeVerdict, AccountGatewayError> {
        let endpoint = self.endpoint(CHECK_CODE_PATH)?;
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .form(&[("loginEmail", email.as_str()), ("authNum", code)])
            .send()
            .await
            .map_err(map_account_transport)?;

        let body = Self::read_body(response).await?;
        Ok(parse_code_verdict(&body))
    }

    async fn sign_up(
        &self,
        submission: &SignUpSubmission,
    ) -> Result<SignUpVerdict, AccountGatewayError> {
        let endpoint = self.endpoint(SIGN_UP_PATH)?;
        let mut form = multipart::Form::new()
            .text("loginEmail", submission.login_email.as_str().to_owned())
            .text("loginPw", submission.password.expose().to_owned())
            .text("nickname", submission.nickname.as_str().to_owned())
            .text("loginType", submission.login_type.as_wire_str())
            .text("emailAuthCheck", submission.email_auth_check.to_string());
        if let Some(image) = submission.image.as_ref() {
            form = form.part("file", attachment_part(image)?);
        }

        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(map_account_transport)?;

        let body = Self::read_body(response).await?;
        Ok(parse_sign_up_verdict(&body))
    }

    async fn fetch_profile_form(&self) -> Result<ProfileForm, AccountGatewayError> {
        let endpoint = self.endpoint(PROFILE_FORM_PATH)?;
        let response = self
            .client
            .get(endpoint)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_account_transport)?;

        let body = Self::read_body(response).await?;
        let dto: ProfileEditFormDto = serde_json::from_slice(&body).map_err(|error| {
            AccountGatewayError::decode(format!("invalid profile form payload: {error}"))
        })?;
        dto.into_domain().map_err(AccountGatewayError::decode)
    }

    async fn edit_profile(
        &self,
        submission: &ProfileEditSubmission,
    ) -> Result<ProfileSnapshot, AccountGatewayError> {
        let endpoint = self.endpoint(PROFILE_EDIT_PATH)?;
        // The server keys "unchanged" off an empty nickname field, so the
        // field is always present on the wire.
        let nickname = submission
            .nickname
            .as_ref()
            .map_or_else(String::new, |nickname| nickname.as_str().to_owned());
        let mut form = multipart::Form::new().text("profileNickname", nickname);
        if let Some(password) = submission.password.as_ref() {
            form = form.text("loginPw", password.expose().to_owned());
        }
        if let Some(image) = submission.image.as_ref() {
            form = form.part("file", attachment_part(image)?);
        }

        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(map_account_transport)?;

        let body = Self::read_body(response).await?;
        let dto: ProfileEditResultDto = serde_json::from_slice(&body).map_err(|error| {
            AccountGatewayError::decode(format!("invalid profile edit payload: {error}"))
        })?;
        Ok(dto.into_domain())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network decoding helpers.

    use super::*;
    use rstest::rstest;

    #[test]
    fn accepted_code_body_confirms() {
        assert_eq!(parse_code_verdict(b"true"), CodeVerdict::Confirmed);
        assert_eq!(parse_code_verdict(b"  true\n"), CodeVerdict::Confirmed);
    }

    #[rstest]
    #[case::server_message(
        "인증번호가 맞지 않습니다.",
        "인증번호가 맞지 않습니다."
    )]
    #[case::blank_body("", "the verification code was not accepted")]
    fn rejected_code_keeps_or_defaults_message(#[case] body: &str, #[case] expected: &str) {
        let verdict = parse_code_verdict(body.as_bytes());
        assert_eq!(
            verdict,
            CodeVerdict::Rejected {
                message: expected.to_owned()
            }
        );
    }

    #[test]
    fn register_success_body_registers() {
        assert_eq!(
            parse_sign_up_verdict(b"User register success"),
            SignUpVerdict::Registered
        );
    }

    #[test]
    fn other_register_bodies_reject_with_server_text() {
        assert_eq!(
            parse_sign_up_verdict(b"duplicate nickname"),
            SignUpVerdict::Rejected {
                message: "duplicate nickname".to_owned()
            }
        );
    }

    #[test]
    fn endpoints_join_onto_the_base_url() {
        let gateway = HttpAccountGateway::new(
            Url::parse("https://api.tripture.app/v1/").expect("valid url"),
            Duration::from_secs(10),
        )
        .expect("client builds");

        let endpoint = gateway.endpoint(SIGN_UP_PATH).expect("joinable");
        assert_eq!(endpoint.as_str(), "https://api.tripture.app/v1/signUp");
    }

    #[test]
    fn attachment_with_bad_mime_is_an_invalid_request() {
        let image =
            ImageAttachment::new("photo.jpg", "not a mime type", vec![1]).expect("attachment");
        let error = attachment_part(&image).expect_err("bad mime");
        assert!(matches!(error, AccountGatewayError::InvalidRequest { .. }));
    }
}
