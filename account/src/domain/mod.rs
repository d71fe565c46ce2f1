//! Domain primitives, form state machines, and driven ports.
//!
//! Purpose: hold everything the two account form flows and the tour lookups
//! need that is independent of transport. Types are validated at
//! construction; services speak to the outside world only through the traits
//! in [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — domain error payload and taxonomy.
//! - Field types ([`EmailAddress`], [`Nickname`], [`Password`], ...).
//! - [`EmailVerification`] — one-time code lifecycle.
//! - [`SignUpForm`] / [`SignUpService`] — signup flow.
//! - [`ProfileEditForm`] / [`ProfileEditService`] — profile-edit flow.
//! - Tour content types ([`GeoPoint`], [`TourSite`], ...).

pub mod error;
pub mod fields;
pub mod ports;
pub mod profile_edit;
pub mod signup;
pub mod tour;
pub mod verification;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::fields::{
    EmailAddress, FieldValidationError, ImageAttachment, Nickname, Password, SecretField,
};
pub use self::profile_edit::{ProfileEditForm, ProfileEditService};
pub use self::signup::{SignUpForm, SignUpService, SubmissionPhase};
pub use self::tour::{ContentId, GeoPoint, TourSite, TourSiteDetail, TourValidationError};
pub use self::verification::EmailVerification;

/// Convenient result alias for form flows.
///
/// # Examples
/// ```
/// use account::domain::{Error, FlowResult};
///
/// fn gate(nickname: &str) -> FlowResult<()> {
///     if nickname.is_empty() {
///         return Err(Error::validation("nickname is required"));
///     }
///     Ok(())
/// }
/// assert!(gate("trip").is_ok());
/// ```
pub type FlowResult<T> = Result<T, Error>;
