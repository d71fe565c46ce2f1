//! Tripture account and tour-content client library.
//!
//! The [`domain`] module owns the form state machines (signup, profile
//! edit), validated field types, and the driven ports they call through; the
//! [`outbound`] module provides reqwest adapters for those ports. Embedding
//! applications construct a form, feed it edits, and drive the services —
//! rendering, navigation, and any profile cache stay on their side of the
//! boundary.

pub mod domain;
pub mod outbound;

pub use domain::{
    ProfileEditForm, ProfileEditService, SignUpForm, SignUpService, SubmissionPhase,
};
pub use outbound::http::{HttpAccountGateway, HttpTourContentSource};
