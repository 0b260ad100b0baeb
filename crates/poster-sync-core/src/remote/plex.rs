use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;

use super::wire::{CollectionsResponse, PostersResponse, SectionsResponse};
use super::{CollectionHandle, Library, MediaServer};
use crate::config::Config;
use crate::error::{Error, Result};

/// Client-identity headers sent with every request.
///
/// These must stay stable across restarts so the server does not register
/// each run as a new client. They are passed explicitly into
/// [`PlexClient::connect`] rather than read from process-global state.
#[derive(Debug, Clone)]
pub struct ClientIdentity {
    pub identifier: String,
    pub product: String,
    pub version: String,
    pub device: String,
    pub device_name: String,
    pub platform: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            identifier: "collection-poster-sync".to_string(),
            product: "Collection Poster Sync".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            device: "Docker".to_string(),
            device_name: "Collection Poster Sync".to_string(),
            platform: std::env::consts::OS.to_string(),
        }
    }
}

/// Media-server client backed by a blocking HTTP connection pool.
///
/// The inner `reqwest` client is safe for concurrent use from worker
/// threads; the pool is sized to the configured worker count.
pub struct PlexClient {
    base_url: String,
    client: Client,
}

impl PlexClient {
    /// Build the client and probe the server root. An unreachable server or
    /// rejected token surfaces here as a fatal error.
    pub fn connect(config: &Config, identity: &ClientIdentity) -> Result<Self> {
        let base_url = config.server_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let identity_headers = [
            ("X-Plex-Token", config.token.as_str()),
            ("X-Plex-Client-Identifier", identity.identifier.as_str()),
            ("X-Plex-Product", identity.product.as_str()),
            ("X-Plex-Version", identity.version.as_str()),
            ("X-Plex-Device", identity.device.as_str()),
            ("X-Plex-Device-Name", identity.device_name.as_str()),
            ("X-Plex-Platform", identity.platform.as_str()),
        ];
        for (name, value) in identity_headers {
            let value = HeaderValue::from_str(value).map_err(|_| {
                Error::Configuration(format!("invalid value for header {}", name))
            })?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .pool_max_idle_per_host(config.worker_count().max(4))
            .build()?;

        let server = Self { base_url, client };
        server.probe()?;
        Ok(server)
    }

    fn probe(&self) -> Result<()> {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::Connection(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::Connection(format!(
                "server returned status {} for {}",
                response.status().as_u16(),
                url
            )));
        }
        debug!("Probed media server at {}", self.base_url);
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(response.json()?)
    }
}

impl MediaServer for PlexClient {
    fn libraries(&self) -> Result<Vec<Library>> {
        let response: SectionsResponse = self.get_json("/library/sections")?;
        Ok(response
            .container
            .directories
            .into_iter()
            .map(|d| Library {
                key: d.key,
                title: d.title,
            })
            .collect())
    }

    fn collections(&self, library: &Library) -> Result<Vec<CollectionHandle>> {
        let path = format!("/library/sections/{}/collections", library.key);
        let response: CollectionsResponse = self.get_json(&path)?;
        Ok(response
            .container
            .metadata
            .into_iter()
            .map(|m| CollectionHandle {
                rating_key: m.rating_key,
                title: m.title,
                library_title: library.title.clone(),
                library_key: library.key.clone(),
            })
            .collect())
    }

    fn selected_poster(&self, collection: &CollectionHandle) -> Result<Option<String>> {
        let path = format!("/library/metadata/{}/posters", collection.rating_key);
        let response: PostersResponse = self.get_json(&path)?;
        Ok(response
            .container
            .posters
            .into_iter()
            .find(|p| p.selected)
            .map(|p| p.key))
    }

    fn download_poster(&self, poster_key: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, poster_key);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(response.bytes()?.to_vec())
    }

    fn upload_poster(&self, collection: &CollectionHandle, bytes: &[u8]) -> Result<()> {
        let url = format!(
            "{}/library/metadata/{}/posters",
            self.base_url, collection.rating_key
        );
        let response = self.client.post(&url).body(bytes.to_vec()).send()?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(())
    }
}
