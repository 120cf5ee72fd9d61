use crate::core::{Context, DeliveryTime, DeliveryTimeRepository, Result};
use crate::utils::error::SurchargeError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

pub const LANGUAGE_HEADER: &str = "x-language-id";
pub const VERSION_HEADER: &str = "x-version-id";

/// Looks delivery times up over HTTP: `GET {endpoint}/delivery-time/{id}`.
///
/// `404` means the record does not exist; every other failure is a lookup error.
#[derive(Debug, Clone)]
pub struct HttpDeliveryTimeRepository {
    client: Client,
    endpoint: Url,
}

impl HttpDeliveryTimeRepository {
    pub fn new(endpoint: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let raw = endpoint.as_ref();
        let invalid = |reason: String| SurchargeError::InvalidConfigValueError {
            field: "delivery_times.endpoint".to_string(),
            value: raw.to_string(),
            reason,
        };
        let endpoint = Url::parse(raw).map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// id 以單一路徑片段編碼，`/`、`?`、`#` 不會改變目標資源
    fn record_url(&self, id: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Self::lookup_error(id, "endpoint cannot carry a path"))?
            .pop_if_empty()
            .push("delivery-time")
            .push(id);
        Ok(url)
    }

    fn lookup_error(id: &str, message: impl Into<String>) -> SurchargeError {
        SurchargeError::LookupError {
            delivery_time_id: id.to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl DeliveryTimeRepository for HttpDeliveryTimeRepository {
    async fn find(&self, id: &str, context: &Context) -> Result<Option<DeliveryTime>> {
        if id.is_empty() {
            return Ok(None);
        }

        let url = self.record_url(id)?;
        tracing::debug!("Fetching delivery time from: {}", url);

        let mut request = self.client.get(url);
        if let Some(language_id) = &context.language_id {
            request = request.header(LANGUAGE_HEADER, language_id);
        }
        if let Some(version_id) = &context.version_id {
            request = request.header(VERSION_HEADER, version_id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::lookup_error(id, e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let delivery_time: DeliveryTime = response
                    .json()
                    .await
                    .map_err(|e| Self::lookup_error(id, format!("invalid response body: {}", e)))?;

                // 回傳的資料必須是同一筆
                if delivery_time.id != id {
                    return Err(Self::lookup_error(
                        id,
                        format!("service returned delivery time '{}'", delivery_time.id),
                    ));
                }
                Ok(Some(delivery_time))
            }
            status => Err(Self::lookup_error(
                id,
                format!("unexpected status {}", status),
            )),
        }
    }
}
