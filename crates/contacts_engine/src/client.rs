use std::time::Duration;

use contacts_logging::{contacts_debug, contacts_info, contacts_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{ApiError, ContactBody, ContactRecord, FailureKind};

const CONTACTS_PATH: &str = "api/contacts";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Server root; `/api/contacts` is resolved against it.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request limit. `None` waits for as long as the server takes.
    pub request_timeout: Option<Duration>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5001".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// The REST contract of the contacts server. Every call is attempted once.
#[async_trait::async_trait]
pub trait ContactsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<ContactRecord>, ApiError>;

    async fn get(&self, id: u64) -> Result<ContactRecord, ApiError>;

    async fn create(&self, body: &ContactBody) -> Result<ContactRecord, ApiError>;

    async fn update(&self, id: u64, body: &ContactBody) -> Result<ContactRecord, ApiError>;

    async fn delete(&self, id: u64) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestContactsApi {
    client: reqwest::Client,
    base: Url,
}

#[derive(Deserialize)]
struct RejectionBody {
    error: String,
}

impl ReqwestContactsApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        // Without a trailing slash `join` would replace the last segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, id: Option<u64>) -> Result<Url, ApiError> {
        let relative = match id {
            Some(id) => format!("{CONTACTS_PATH}/{id}"),
            None => CONTACTS_PATH.to_string(),
        };
        self.base
            .join(&relative)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&ContactBody>,
    ) -> Result<Vec<u8>, ApiError> {
        contacts_info!("{} {}", method, url);
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            let json = serde_json::to_vec(body)
                .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
            request = request.header(CONTENT_TYPE, "application/json").body(json);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let rejection = rejection_from(status, &bytes);
            contacts_warn!("{} {} rejected: {}", method, url, rejection);
            return Err(rejection);
        }
        contacts_debug!("{} {} -> {} ({} bytes)", method, url, status, bytes.len());
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl ContactsApi for ReqwestContactsApi {
    async fn list(&self) -> Result<Vec<ContactRecord>, ApiError> {
        let url = self.endpoint(None)?;
        decode(&self.send(Method::GET, url, None).await?)
    }

    async fn get(&self, id: u64) -> Result<ContactRecord, ApiError> {
        let url = self.endpoint(Some(id))?;
        decode(&self.send(Method::GET, url, None).await?)
    }

    async fn create(&self, body: &ContactBody) -> Result<ContactRecord, ApiError> {
        let url = self.endpoint(None)?;
        decode(&self.send(Method::POST, url, Some(body)).await?)
    }

    async fn update(&self, id: u64, body: &ContactBody) -> Result<ContactRecord, ApiError> {
        let url = self.endpoint(Some(id))?;
        decode(&self.send(Method::PUT, url, Some(body)).await?)
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let url = self.endpoint(Some(id))?;
        self.send(Method::DELETE, url, None).await.map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn rejection_from(status: StatusCode, body: &[u8]) -> ApiError {
    let server = serde_json::from_slice::<RejectionBody>(body)
        .ok()
        .map(|rejection| rejection.error);
    ApiError::rejected(status.as_u16(), status.to_string(), server)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Network, format!("timed out: {err}"));
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
