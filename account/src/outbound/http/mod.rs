//! Reqwest-backed adapters for the driven ports.

mod account;
mod dto;
mod error_mapping;
mod tour;

pub use account::{AccountHttpIdentity, HttpAccountGateway};
pub use tour::HttpTourContentSource;
