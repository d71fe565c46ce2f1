//! Driven port for the regional tour content catalogue.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::tour::{ContentId, GeoPoint, TourSite, TourSiteDetail};

define_port_error! {
    /// Errors surfaced while calling the tour content catalogue.
    pub enum TourContentSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "tour catalogue transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "tour catalogue timeout: {message}",
        /// The response could not be decoded.
        Decode { message: String } =>
            "tour catalogue response decode failed: {message}",
        /// The catalogue rejected the request shape (4xx).
        InvalidRequest { message: String } =>
            "tour catalogue rejected request: {message}",
        /// The catalogue failed to serve the request (5xx or a failure
        /// result header).
        Upstream { message: String } =>
            "tour catalogue upstream failure: {message}",
    }
}

/// Port for read-only tour content lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourContentSource: Send + Sync {
    /// List attractions around a coordinate.
    async fn nearby(&self, point: &GeoPoint) -> Result<Vec<TourSite>, TourContentSourceError>;

    /// Fetch the common detail for one attraction.
    async fn detail(
        &self,
        content_id: &ContentId,
    ) -> Result<TourSiteDetail, TourContentSourceError>;
}

/// Fixture implementation returning an empty catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureTourContentSource;

#[async_trait]
impl TourContentSource for FixtureTourContentSource {
    async fn nearby(&self, _point: &GeoPoint) -> Result<Vec<TourSite>, TourContentSourceError> {
        Ok(Vec::new())
    }

    async fn detail(
        &self,
        content_id: &ContentId,
    ) -> Result<TourSiteDetail, TourContentSourceError> {
        Ok(TourSiteDetail {
            content_id: content_id.clone(),
            title: String::new(),
            overview: String::new(),
            address: None,
            image_url: None,
        })
    }
}
