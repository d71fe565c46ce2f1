//! Driven ports for the hexagonal boundary.
//!
//! Ports describe how the domain expects to interact with the remote API.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

mod macros;
pub(crate) use macros::define_port_error;

mod account_gateway;
mod tour_content_source;

#[cfg(test)]
pub use account_gateway::MockAccountGateway;
pub use account_gateway::{
    AccountGateway, AccountGatewayError, CodeVerdict, FixtureAccountGateway, LoginType,
    ProfileEditSubmission, ProfileForm, ProfileSnapshot, SignUpSubmission, SignUpVerdict,
};
#[cfg(test)]
pub use tour_content_source::MockTourContentSource;
pub use tour_content_source::{
    FixtureTourContentSource, TourContentSource, TourContentSourceError,
};
