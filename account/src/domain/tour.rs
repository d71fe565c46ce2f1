//! Regional tour content domain types.
//!
//! The map screen asks for attractions around a coordinate; the detail screen
//! asks for one attraction by content identifier. Both are read-only lookups;
//! the types here are the domain-owned contracts the tour source port speaks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for tour lookup inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourValidationError {
    /// A coordinate was NaN or infinite.
    NonFiniteCoordinate,
    /// Longitude outside `[-180, 180]`.
    LongitudeOutOfRange,
    /// Latitude outside `[-90, 90]`.
    LatitudeOutOfRange,
    /// Content identifier was empty once trimmed.
    EmptyContentId,
}

impl fmt::Display for TourValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteCoordinate => write!(f, "coordinates must be finite"),
            Self::LongitudeOutOfRange => write!(f, "longitude must be within [-180, 180]"),
            Self::LatitudeOutOfRange => write!(f, "latitude must be within [-90, 90]"),
            Self::EmptyContentId => write!(f, "content id must not be empty"),
        }
    }
}

impl std::error::Error for TourValidationError {}

/// A WGS84 coordinate pair used to centre a nearby search.
///
/// # Examples
/// ```
/// use account::domain::GeoPoint;
///
/// let point = GeoPoint::new(127.758_664, 37.858_039).expect("valid point");
/// assert_eq!(point.longitude(), 127.758_664);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// Validate and construct a coordinate pair.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, TourValidationError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(TourValidationError::NonFiniteCoordinate);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(TourValidationError::LongitudeOutOfRange);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(TourValidationError::LatitudeOutOfRange);
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Longitude in WGS84.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Latitude in WGS84.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }
}

/// Stable identifier of one tour content entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    /// Validate and construct a [`ContentId`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, TourValidationError> {
        let normalized = value.as_ref().trim();
        if normalized.is_empty() {
            return Err(TourValidationError::EmptyContentId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContentId> for String {
    fn from(value: ContentId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ContentId {
    type Error = TourValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One attraction returned by a nearby search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSite {
    /// Stable content identifier.
    pub content_id: ContentId,
    /// Display title.
    pub title: String,
    /// Street address, when the catalogue has one.
    pub address: Option<String>,
    /// Thumbnail image URL, when the catalogue has one.
    pub image_url: Option<String>,
    /// Site position.
    pub position: GeoPoint,
    /// Distance from the query point in metres, when reported.
    pub distance_metres: Option<f64>,
}

/// Full detail for one attraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSiteDetail {
    /// Stable content identifier.
    pub content_id: ContentId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub overview: String,
    /// Street address, when the catalogue has one.
    pub address: Option<String>,
    /// Hero image URL, when the catalogue has one.
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN, 37.0, TourValidationError::NonFiniteCoordinate)]
    #[case(f64::INFINITY, 37.0, TourValidationError::NonFiniteCoordinate)]
    #[case(-181.0, 37.0, TourValidationError::LongitudeOutOfRange)]
    #[case(127.0, 91.0, TourValidationError::LatitudeOutOfRange)]
    fn out_of_range_points_are_rejected(
        #[case] longitude: f64,
        #[case] latitude: f64,
        #[case] expected: TourValidationError,
    ) {
        let err = GeoPoint::new(longitude, latitude).expect_err("invalid point must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn boundary_points_are_accepted() {
        let point = GeoPoint::new(180.0, -90.0).expect("boundary point valid");
        assert_eq!(point.longitude(), 180.0);
        assert_eq!(point.latitude(), -90.0);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_content_ids_are_rejected(#[case] value: &str) {
        let err = ContentId::new(value).expect_err("blank id must fail");
        assert_eq!(err, TourValidationError::EmptyContentId);
    }

    #[test]
    fn content_id_is_trimmed() {
        let id = ContentId::new(" 2733967 ").expect("valid id");
        assert_eq!(id.as_str(), "2733967");
    }
}
