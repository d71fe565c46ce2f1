//! Profile-edit form state and save flow.
//!
//! The screen loads the current profile, then saves either a no-password
//! partial update (nickname and/or image) or a fully validated password
//! change. Password changes are only offered to native accounts; Kakao
//! sign-ins manage credentials with Kakao.

use std::sync::Arc;

use zeroize::Zeroizing;

use validation::{Validity, password_format_ok, passwords_match};

use crate::domain::error::Error;
use crate::domain::FlowResult;
use crate::domain::fields::{
    FieldValidationError, ImageAttachment, Nickname, Password, SecretField,
};
use crate::domain::ports::{
    AccountGateway, LoginType, ProfileEditSubmission, ProfileForm, ProfileSnapshot,
};

const IN_FLIGHT_MESSAGE: &str = "another call is in flight for this form";

const NOTHING_TO_SAVE_MESSAGE: &str = "change a nickname, picture, or password before saving";

const CURRENT_PASSWORD_MESSAGE: &str = "enter your current password";

const PASSWORD_RULE_MESSAGE: &str =
    "passwords need at least 8 characters including a letter, a digit, and a symbol";

const CONFIRM_MESSAGE: &str = "check the new password confirmation";

const KAKAO_MESSAGE: &str = "password change is not available for Kakao sign-in accounts";

/// In-memory state of the profile-edit screen.
///
/// An empty nickname and an unset image mean "leave unchanged"; password
/// fields count as touched as soon as any of the three holds text.
#[derive(Debug, Clone, Default)]
pub struct ProfileEditForm {
    profile: Option<ProfileForm>,
    nickname: String,
    current_password: Zeroizing<String>,
    password: SecretField,
    confirm: SecretField,
    image: Option<ImageAttachment>,
    busy: bool,
}

impl ProfileEditForm {
    /// Create an empty form; [`ProfileEditService::load`] populates it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the replacement nickname (empty means unchanged).
    pub fn set_nickname(&mut self, value: impl Into<String>) {
        self.nickname = value.into();
    }

    /// Overwrite the current-password field.
    pub fn set_current_password(&mut self, value: impl Into<String>) {
        self.current_password = Zeroizing::new(value.into());
    }

    /// Overwrite the new-password field, re-evaluating the password rule.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password.set(value, password_format_ok);
    }

    /// Overwrite the confirmation field, re-evaluating equality against the
    /// current new-password value.
    pub fn set_password_confirm(&mut self, value: impl Into<String>) {
        let value = value.into();
        let ok = passwords_match(self.password.value(), &value);
        self.confirm.set(value, |_| ok);
    }

    /// Stage or clear a replacement profile image.
    pub fn set_image(&mut self, image: Option<ImageAttachment>) {
        self.image = image;
    }

    /// Profile loaded for this screen, when the fetch has completed.
    #[must_use]
    pub const fn profile(&self) -> Option<&ProfileForm> {
        self.profile.as_ref()
    }

    /// Replacement nickname input.
    #[must_use]
    pub fn nickname(&self) -> &str {
        self.nickname.as_str()
    }

    /// Verdict on the new-password field.
    #[must_use]
    pub const fn password_validity(&self) -> Validity {
        self.password.validity()
    }

    /// Verdict on the confirmation field.
    #[must_use]
    pub const fn confirm_validity(&self) -> Validity {
        self.confirm.validity()
    }

    /// Whether a remote call is in flight for this form.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether a password change can be offered for the loaded profile.
    ///
    /// Defaults to true until the profile is loaded; the save gate makes the
    /// final call.
    #[must_use]
    pub fn offers_password_change(&self) -> bool {
        self.profile
            .as_ref()
            .is_none_or(|profile| profile.login_type == LoginType::Native)
    }

    fn password_touched(&self) -> bool {
        !self.current_password.is_empty()
            || !self.password.value().is_empty()
            || !self.confirm.value().is_empty()
    }

    fn nickname_changed(&self) -> bool {
        !self.nickname.trim().is_empty()
    }

    #[cfg(test)]
    pub(crate) fn mark_in_flight(&mut self) {
        self.busy = true;
    }
}

/// Drives the profile-edit flow against an [`AccountGateway`].
#[derive(Clone)]
pub struct ProfileEditService<G> {
    gateway: Arc<G>,
}

impl<G> ProfileEditService<G> {
    /// Create a service with the given gateway.
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

fn invariant_failure(err: FieldValidationError) -> Error {
    Error::internal(format!("gated field failed validation: {err}"))
}

impl<G> ProfileEditService<G>
where
    G: AccountGateway,
{
    /// Fetch the current profile and remember it on the form.
    pub async fn load(&self, form: &mut ProfileEditForm) -> FlowResult<ProfileForm> {
        if form.busy {
            return Err(Error::busy(IN_FLIGHT_MESSAGE));
        }

        form.busy = true;
        let result = self.gateway.fetch_profile_form().await;
        form.busy = false;

        match result {
            Ok(profile) => {
                form.profile = Some(profile.clone());
                Ok(profile)
            }
            Err(err) => Err(Error::submission(err.to_string())),
        }
    }

    /// Save the staged changes.
    ///
    /// Either a no-password partial update (nickname and/or image changed,
    /// password fields untouched) or a fully validated password change.
    /// Nothing staged fails locally; no gateway call is made for any local
    /// failure. The returned snapshot is the caller's to apply to whatever
    /// profile cache it keeps.
    pub async fn save(&self, form: &mut ProfileEditForm) -> FlowResult<ProfileSnapshot> {
        if form.busy {
            return Err(Error::busy(IN_FLIGHT_MESSAGE));
        }

        let submission = Self::stage_submission(form)?;

        form.busy = true;
        let result = self.gateway.edit_profile(&submission).await;
        form.busy = false;

        match result {
            Ok(snapshot) => {
                if let Some(profile) = form.profile.as_mut() {
                    profile.nickname = snapshot.nickname.clone();
                    profile.image_name = snapshot.image_name.clone();
                }
                Ok(snapshot)
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile edit failed");
                Err(Error::submission(err.to_string()))
            }
        }
    }

    fn stage_submission(form: &ProfileEditForm) -> Result<ProfileEditSubmission, Error> {
        let nickname = if form.nickname_changed() {
            Some(Nickname::new(form.nickname.as_str()).map_err(invariant_failure)?)
        } else {
            None
        };

        if !form.password_touched() {
            if nickname.is_none() && form.image.is_none() {
                return Err(Error::validation(NOTHING_TO_SAVE_MESSAGE));
            }
            return Ok(ProfileEditSubmission {
                nickname,
                password: None,
                image: form.image.clone(),
            });
        }

        if !form.offers_password_change() {
            return Err(Error::validation(KAKAO_MESSAGE));
        }
        if form.current_password.is_empty() {
            return Err(Error::validation(CURRENT_PASSWORD_MESSAGE));
        }
        if !form.password.is_valid() {
            return Err(Error::validation(PASSWORD_RULE_MESSAGE));
        }
        if !passwords_match(form.password.value(), form.confirm.value()) {
            return Err(Error::validation(CONFIRM_MESSAGE));
        }

        let password = Password::new(form.password.value()).map_err(invariant_failure)?;
        Ok(ProfileEditSubmission {
            nickname,
            password: Some(password),
            image: form.image.clone(),
        })
    }
}
