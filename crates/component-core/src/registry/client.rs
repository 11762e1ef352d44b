//! Manifest retrieval from the remote registry

use super::manifest::ComponentManifest;
use crate::error::RegistryError;
use crate::http::HttpClient;
use crate::product::{self, ProductConfig};
use std::sync::Arc;
use url::Url;

/// Fetches the component manifest; one request per call, never cached
pub struct RegistryClient {
    http: Arc<dyn HttpClient>,
    url: Url,
}

impl RegistryClient {
    pub fn new(http: Arc<dyn HttpClient>, url: Url) -> Self {
        Self { http, url }
    }

    /// Create a client for the product's registry, honoring its env override
    pub fn from_config<C: ProductConfig>(
        config: &C,
        http: Arc<dyn HttpClient>,
    ) -> anyhow::Result<Self> {
        let url = product::url_from_env(config.registry_url_env(), config.default_registry_url())?;
        Ok(Self::new(http, url))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn fetch_manifest(&self) -> Result<ComponentManifest, RegistryError> {
        let response = self
            .http
            .get(&self.url)
            .await
            .map_err(|e| RegistryError::Unavailable {
                url: self.url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(RegistryError::Unavailable {
                url: self.url.to_string(),
                reason: response.status_line(),
            });
        }

        ComponentManifest::from_slice(&response.body).map_err(|source| RegistryError::Malformed {
            url: self.url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::StubHttp;

    const REGISTRY: &str = "https://registry.example.com/components.json";

    fn client(http: StubHttp) -> (RegistryClient, Arc<StubHttp>) {
        let http = Arc::new(http);
        let client = RegistryClient::new(http.clone(), Url::parse(REGISTRY).unwrap());
        (client, http)
    }

    #[tokio::test]
    async fn test_fetch_manifest() {
        let (client, http) = client(StubHttp::new().json(
            REGISTRY,
            r#"{"alert": {"dependencies": ["clsx"], "src": "https://x/y"}}"#,
        ));

        let manifest = client.fetch_manifest().await.unwrap();
        assert_eq!(manifest.names(), vec!["alert"]);
        assert_eq!(http.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_unavailable() {
        let (client, _) = client(StubHttp::new().route(REGISTRY, 503, "down"));

        let err = client.fetch_manifest().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RegistryUnavailable);
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_transport_error_is_unavailable_without_retry() {
        let (client, http) = client(StubHttp::new().unreachable(REGISTRY));

        let err = client.fetch_manifest().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RegistryUnavailable);
        assert_eq!(http.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unparsable_payload_is_malformed() {
        let (client, _) = client(StubHttp::new().json(REGISTRY, r#"["alert"]"#));

        let err = client.fetch_manifest().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RegistryMalformed);
    }
}
