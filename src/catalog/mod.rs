//! Song search against the public music catalog.

use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};

use crate::{config::CatalogConfig, domain::Track};

pub mod entry;
pub mod error;
pub mod transport;

pub use entry::{RawCatalogEntry, SearchResponse};
pub use error::CatalogError;
pub use transport::{CatalogTransport, HttpTransport, TransportResponse};

/// Most results a single search asks for.
pub const RESULT_LIMIT: u32 = 10;
pub const MEDIA: &str = "music";
pub const ENTITY: &str = "song";

pub struct CatalogSearchClient<T> {
    transport: T,
    endpoint: String,
    country: String,
}

impl<T: CatalogTransport> CatalogSearchClient<T> {
    pub fn new(transport: T, config: &CatalogConfig) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.clone(),
            country: config.country.clone(),
        }
    }

    /// Searches songs matching `keyword`.
    ///
    /// Failures are logged and come back as an empty list.
    pub async fn search(&self, keyword: &str) -> Vec<Track> {
        match self.try_search(keyword).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("search for '{keyword}' failed: {e}");
                Vec::new()
            }
        }
    }

    /// Same as [`Self::search`] but tells a failed search apart from one
    /// that found nothing.
    pub async fn try_search(&self, keyword: &str) -> Result<Vec<Track>, CatalogError> {
        debug!("searching {} for '{keyword}'", self.endpoint);

        let params = self.query_params(keyword);
        let response = self.transport.get(&self.endpoint, &params).await?;
        if !response.is_success() {
            return Err(CatalogError::Status(response.status));
        }

        let tracks = SearchResponse::parse(&response.body)?.into_tracks();
        debug!("catalog returned {} songs for '{keyword}'", tracks.len());
        Ok(tracks)
    }

    fn query_params(&self, keyword: &str) -> Vec<(String, String)> {
        vec![
            ("media".to_string(), MEDIA.to_string()),
            ("entity".to_string(), ENTITY.to_string()),
            ("term".to_string(), keyword.to_string()),
            ("limit".to_string(), RESULT_LIMIT.to_string()),
            ("country".to_string(), self.country.clone()),
            (cache_bust_token(), String::new()),
        ]
    }
}

/// A throwaway query key unique per request, so intermediaries don't
/// answer from a cached response.
pub fn cache_bust_token() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let noise: u64 = rand::random();
    to_base36(millis ^ noise.rotate_left(17))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
