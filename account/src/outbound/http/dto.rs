//! DTOs for decoding account API JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain types in one pass.

use serde::Deserialize;

use crate::domain::fields::EmailAddress;
use crate::domain::ports::{LoginType, ProfileForm, ProfileSnapshot};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProfileEditFormDto {
    pub(super) profile_nickname: String,
    pub(super) login_email: String,
    pub(super) login_type: String,
    #[serde(default)]
    pub(super) profile_img_name: Option<String>,
}

impl ProfileEditFormDto {
    pub(super) fn into_domain(self) -> Result<ProfileForm, String> {
        let login_email = EmailAddress::new(self.login_email)
            .map_err(|err| format!("profile form carries an invalid login email: {err}"))?;
        let login_type = LoginType::from_wire_str(&self.login_type)
            .ok_or_else(|| format!("unknown login type {:?}", self.login_type))?;
        Ok(ProfileForm {
            nickname: self.profile_nickname,
            login_email,
            login_type,
            image_name: normalise_image_name(self.profile_img_name),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProfileEditResultDto {
    pub(super) profile_nickname: String,
    #[serde(default)]
    pub(super) profile_img_name: Option<String>,
}

impl ProfileEditResultDto {
    pub(super) fn into_domain(self) -> ProfileSnapshot {
        ProfileSnapshot {
            nickname: self.profile_nickname,
            image_name: normalise_image_name(self.profile_img_name),
        }
    }
}

// The server reports "no image" as either null or an empty string.
fn normalise_image_name(value: Option<String>) -> Option<String> {
    value.filter(|name| !name.trim().is_empty())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn profile_form_decodes_and_maps() {
        let body = r#"{
            "profileNickname": "trip",
            "loginEmail": "a@b.co",
            "loginType": "SELF",
            "profileImgName": "photo.jpg"
        }"#;

        let dto: ProfileEditFormDto = serde_json::from_str(body).expect("decode");
        let form = dto.into_domain().expect("map");
        assert_eq!(form.nickname, "trip");
        assert_eq!(form.login_type, LoginType::Native);
        assert_eq!(form.image_name.as_deref(), Some("photo.jpg"));
    }

    #[test]
    fn empty_image_name_maps_to_none() {
        let body = r#"{
            "profileNickname": "trip",
            "loginEmail": "a@b.co",
            "loginType": "KAKAO",
            "profileImgName": ""
        }"#;

        let dto: ProfileEditFormDto = serde_json::from_str(body).expect("decode");
        let form = dto.into_domain().expect("map");
        assert_eq!(form.login_type, LoginType::Kakao);
        assert_eq!(form.image_name, None);
    }

    #[test]
    fn unknown_login_type_fails_mapping() {
        let dto = ProfileEditFormDto {
            profile_nickname: "trip".to_owned(),
            login_email: "a@b.co".to_owned(),
            login_type: "GOOGLE".to_owned(),
            profile_img_name: None,
        };
        let error = dto.into_domain().expect_err("unknown type");
        assert!(error.contains("GOOGLE"));
    }

    #[test]
    fn edit_result_maps_missing_image() {
        let body = r#"{ "profileNickname": "renamed" }"#;
        let dto: ProfileEditResultDto = serde_json::from_str(body).expect("decode");
        let snapshot = dto.into_domain();
        assert_eq!(snapshot.nickname, "renamed");
        assert_eq!(snapshot.image_name, None);
    }
}
