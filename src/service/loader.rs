use crate::service::error::FetchError;
use crate::service::xml::{decode_rows, XmlRow};
use log::{info, warn};
use reqwest::Client;

/// Default endpoint of the ANA telemetry web service.
pub const DEFAULT_BASE_URL: &str = "http://telemetriaws1.ana.gov.br/ServiceANA.asmx";

/// Issues GET requests against the service operations and decodes the
/// tabular XML they answer with.
#[derive(Debug, Clone)]
pub struct ServiceLoader {
    base_url: String,
    client: Client,
}

impl ServiceLoader {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls `operation` (e.g. `HidroSerieHistorica`) with `params` and
    /// returns every row tagged `row_tag`.
    pub async fn rows(
        &self,
        operation: &str,
        params: &[(&str, String)],
        row_tag: &str,
    ) -> Result<Vec<XmlRow>, FetchError> {
        let url = format!("{}/{}", self.base_url, operation);
        let bytes = self.download(&url, params).await?;
        let rows = decode_rows(&bytes, row_tag).map_err(|source| FetchError::Xml {
            url: url.clone(),
            source,
        })?;
        info!("Decoded {} '{}' rows from {}", rows.len(), row_tag, url);
        Ok(rows)
    }

    async fn download(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<u8>, FetchError> {
        info!("Requesting {} with {:?}", url, params);

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;
        Ok(bytes.to_vec())
    }
}
