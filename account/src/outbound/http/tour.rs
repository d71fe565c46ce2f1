//! Reqwest-backed tour content adapter.
//!
//! The catalogue wraps every payload in a result envelope: a header whose
//! code `0000` means success, and a body whose `items` field is an empty
//! string (not an empty list) when nothing matched. The DTOs here absorb
//! both quirks before mapping into domain types.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use serde::Deserialize;

use super::error_mapping::{map_status_error, map_transport_error};
use crate::domain::ports::{TourContentSource, TourContentSourceError};
use crate::domain::tour::{ContentId, GeoPoint, TourSite, TourSiteDetail};

const SUCCESS_RESULT_CODE: &str = "0000";

const NEARBY_PATH: &str = "locationBasedList";
const DETAIL_PATH: &str = "detailCommon";

/// Tour content adapter performing HTTP GET requests against one base URL.
pub struct HttpTourContentSource {
    client: Client,
    base: Url,
}

impl HttpTourContentSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// As with the account gateway, the base URL must end with a trailing
    /// slash.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TourContentSourceError> {
        self.base.join(path).map_err(|error| {
            TourContentSourceError::invalid_request(format!(
                "endpoint {path} is not joinable: {error}"
            ))
        })
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>, TourContentSourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_tour_transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_tour_transport)?;
        if !status.is_success() {
            return Err(map_status_error(
                status,
                body.as_ref(),
                TourContentSourceError::timeout,
                TourContentSourceError::invalid_request,
                TourContentSourceError::upstream,
            ));
        }
        Ok(body.to_vec())
    }
}

fn map_tour_transport(error: reqwest::Error) -> TourContentSourceError {
    map_transport_error(
        &error,
        TourContentSourceError::timeout,
        TourContentSourceError::transport,
    )
}

#[async_trait]
impl TourContentSource for HttpTourContentSource {
    async fn nearby(&self, point: &GeoPoint) -> Result<Vec<TourSite>, TourContentSourceError> {
        let mut url = self.endpoint(NEARBY_PATH)?;
        url.query_pairs_mut()
            .append_pair("mapX", &point.longitude().to_string())
            .append_pair("mapY", &point.latitude().to_string());

        let body = self.fetch(url).await?;
        parse_nearby(&body)
    }

    async fn detail(
        &self,
        content_id: &ContentId,
    ) -> Result<TourSiteDetail, TourContentSourceError> {
        let mut url = self.endpoint(DETAIL_PATH)?;
        url.query_pairs_mut()
            .append_pair("contentId", content_id.as_str());

        let body = self.fetch(url).await?;
        parse_detail(&body, content_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct EnvelopeDto<T> {
    response: ResponseDto<T>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ResponseDto<T> {
    header: HeaderDto,
    #[serde(default)]
    body: Option<BodyDto<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeaderDto {
    result_code: String,
    #[serde(default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct BodyDto<T> {
    #[serde(default = "ItemsDto::empty")]
    items: ItemsDto<T>,
}

/// `items` is a wrapped list when results exist and a bare empty string
/// otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemsDto<T> {
    Wrapped { item: Vec<T> },
    Empty(String),
}

impl<T> ItemsDto<T> {
    fn empty() -> Self {
        Self::Empty(String::new())
    }

    fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { item } => item,
            Self::Empty(_) => Vec::new(),
        }
    }
}

fn unwrap_envelope<T>(body: &[u8]) -> Result<Vec<T>, TourContentSourceError>
where
    T: for<'de> Deserialize<'de>,
{
    let decoded: EnvelopeDto<T> = serde_json::from_slice(body).map_err(|error| {
        TourContentSourceError::decode(format!("invalid catalogue payload: {error}"))
    })?;

    let header = &decoded.response.header;
    if header.result_code != SUCCESS_RESULT_CODE {
        return Err(TourContentSourceError::upstream(format!(
            "result code {}: {}",
            header.result_code,
            if header.result_msg.is_empty() {
                "no message"
            } else {
                header.result_msg.as_str()
            }
        )));
    }

    Ok(decoded
        .response
        .body
        .map(|body_dto| body_dto.items.into_items())
        .unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct SiteDto {
    contentid: String,
    title: String,
    #[serde(default)]
    addr1: String,
    #[serde(default)]
    firstimage: String,
    mapx: String,
    mapy: String,
    #[serde(default)]
    dist: String,
}

impl SiteDto {
    fn into_domain(self) -> Result<TourSite, TourContentSourceError> {
        let longitude = parse_coordinate(&self.mapx, "mapx")?;
        let latitude = parse_coordinate(&self.mapy, "mapy")?;
        let position = GeoPoint::new(longitude, latitude).map_err(|error| {
            TourContentSourceError::decode(format!(
                "content {} carries an invalid position: {error}",
                self.contentid
            ))
        })?;
        let content_id = ContentId::new(&self.contentid).map_err(|error| {
            TourContentSourceError::decode(format!("invalid content id: {error}"))
        })?;
        let distance_metres = if self.dist.is_empty() {
            None
        } else {
            Some(parse_coordinate(&self.dist, "dist")?)
        };

        Ok(TourSite {
            content_id,
            title: self.title,
            address: none_when_blank(self.addr1),
            image_url: none_when_blank(self.firstimage),
            position,
            distance_metres,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DetailDto {
    contentid: String,
    title: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    addr1: String,
    #[serde(default)]
    firstimage: String,
}

impl DetailDto {
    fn into_domain(self) -> Result<TourSiteDetail, TourContentSourceError> {
        let content_id = ContentId::new(&self.contentid).map_err(|error| {
            TourContentSourceError::decode(format!("invalid content id: {error}"))
        })?;
        Ok(TourSiteDetail {
            content_id,
            title: self.title,
            overview: self.overview,
            address: none_when_blank(self.addr1),
            image_url: none_when_blank(self.firstimage),
        })
    }
}

fn parse_coordinate(value: &str, field: &str) -> Result<f64, TourContentSourceError> {
    value.trim().parse::<f64>().map_err(|error| {
        TourContentSourceError::decode(format!("field {field} is not numeric ({value:?}): {error}"))
    })
}

fn none_when_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_nearby(body: &[u8]) -> Result<Vec<TourSite>, TourContentSourceError> {
    unwrap_envelope::<SiteDto>(body)?
        .into_iter()
        .map(SiteDto::into_domain)
        .collect()
}

fn parse_detail(
    body: &[u8],
    requested: &ContentId,
) -> Result<TourSiteDetail, TourContentSourceError> {
    let mut items = unwrap_envelope::<DetailDto>(body)?;
    if items.is_empty() {
        return Err(TourContentSourceError::decode(format!(
            "detail response for {requested} contained no item"
        )));
    }
    items.swap_remove(0).into_domain()
}
