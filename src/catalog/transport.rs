use std::future::Future;

use crate::catalog::error::CatalogError;

/// Status and body of a catalog response, whatever the status was.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET against the catalog endpoint.
pub trait CatalogTransport {
    fn get(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> impl Future<Output = Result<TransportResponse, CatalogError>> + Send;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("favdeck/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl CatalogTransport for HttpTransport {
    async fn get(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<TransportResponse, CatalogError> {
        let response = self
            .client
            .get(endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    CatalogError::Network(e.to_string())
                } else {
                    CatalogError::Http(e)
                }
            })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
