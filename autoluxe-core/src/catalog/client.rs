use super::models::{Car, CarPage};
use super::params::listing_params;
use crate::auth::AuthSession;
use crate::car_draft::{CarDraftError, NewCar};
use crate::config::Config;
use async_trait::async_trait;
use autoluxe_common::{FilterSelection, PageCursor};
use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success response. Carries the status and the raw body.
    #[error("catalog returned {status}: {body}")]
    Status { status: u16, body: String },
    /// A 401. The status is implied; the body is kept for diagnostics.
    #[error("not authorized, sign in again: {body}")]
    Unauthorized { body: String },
    #[error("car not found: {0}")]
    NotFound(String),
    #[error("invalid car: {0}")]
    InvalidDraft(#[from] CarDraftError),
}

/// Something that can produce pages of car listings.
///
/// Implemented by [`CatalogClient`]; the listing controller only depends on
/// this trait.
#[async_trait]
pub trait CarSource: Send + Sync {
    async fn fetch_page(
        &self,
        cursor: PageCursor,
        filters: &FilterSelection,
    ) -> Result<CarPage, CatalogError>;
}

/// HTTP client for the car catalog REST service.
///
/// Stateless per call: no retry and no de-duplication of in-flight requests.
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    page_size: u32,
    auth: Option<AuthSession>,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: String, page_size: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: page_size.max(1),
            auth: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.backend_url.clone(), config.page_size)
    }

    /// Attach a bearer token session to every request.
    pub fn with_auth(mut self, auth: AuthSession) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Full listing URL for a page, as requested by [`CatalogClient::fetch_page`].
    pub fn listing_url(&self, cursor: PageCursor, filters: &FilterSelection) -> String {
        let params = listing_params(cursor, filters, self.page_size);
        let query =
            serde_urlencoded::to_string(&params).expect("string pairs are always serializable");
        format!("{}/api/cars?{}", self.base_url, query)
    }

    fn car_url(&self, id: &str) -> String {
        format!("{}/api/cars/{}", self.base_url, urlencoding::encode(id))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth.as_ref().and_then(AuthSession::token) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map non-success responses to a [`CatalogError`].
    async fn check(&self, resp: Response) -> Result<Response, CatalogError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            if let Some(auth) = &self.auth {
                auth.expire();
            }
            return Err(CatalogError::Unauthorized { body });
        }

        warn!("Catalog error response ({status}): {body}");
        Err(CatalogError::Status {
            status: status.as_u16(),
            body,
        })
    }

    pub async fn fetch_page(
        &self,
        cursor: PageCursor,
        filters: &FilterSelection,
    ) -> Result<CarPage, CatalogError> {
        let url = self.listing_url(cursor, filters);
        debug!("Fetching cars: {url}");

        let resp = self.authorize(self.http.get(&url)).send().await?;
        let page: CarPage = self.check(resp).await?.json().await?;

        debug!(
            "Received page {:?}/{:?} with {} cars ({:?} total)",
            page.current_page,
            page.total_pages,
            page.cars.len(),
            page.total_cars
        );
        Ok(page)
    }

    pub async fn fetch_car(&self, id: &str) -> Result<Car, CatalogError> {
        let url = self.car_url(id);
        debug!("Fetching car: {url}");

        let resp = self.authorize(self.http.get(&url)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        Ok(self.check(resp).await?.json().await?)
    }

    /// Validate and submit a new car listing.
    pub async fn create_car(&self, car: &NewCar) -> Result<Car, CatalogError> {
        car.validate()?;
        let url = format!("{}/api/cars", self.base_url);

        let resp = self
            .authorize(self.http.post(&url))
            .json(car)
            .send()
            .await?;
        let created: Car = self.check(resp).await?.json().await?;

        info!("Created car {} ({})", created.id, car.title());
        Ok(created)
    }
}

#[async_trait]
impl CarSource for CatalogClient {
    async fn fetch_page(
        &self,
        cursor: PageCursor,
        filters: &FilterSelection,
    ) -> Result<CarPage, CatalogError> {
        CatalogClient::fetch_page(self, cursor, filters).await
    }
}
