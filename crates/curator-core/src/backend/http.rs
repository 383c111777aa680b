//! HTTP backend using reqwest

use std::time::Duration;

use async_trait::async_trait;
use curator_domain::{
    DeleteRequest, LocationResponse, MutationRequest, NavigateRequest, PageState,
    StructureRequest, StructureResponse,
};
use reqwest::{header::USER_AGENT, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use super::{Backend, Direction};
use crate::config::{BackendConfig, EndpointConfig};
use crate::error::TransportError;

pub struct HttpBackend {
    client: Client,
    base: Url,
    user_agent: String,
    endpoints: EndpointConfig,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, TransportError> {
        let base = Url::parse(&config.base_url).map_err(|_| TransportError::InvalidUrl {
            url: config.base_url.clone(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::RequestFailed {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base,
            user_agent: config.user_agent.clone(),
            endpoints: config.endpoints.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base.join(path).map_err(|_| TransportError::InvalidUrl {
            url: path.to_string(),
        })
    }

    /// URL serving the JSON page state for a location returned by the server.
    ///
    /// Locations may be absolute or relative to the base; only their path and
    /// query are kept.
    pub fn page_url(&self, location: &str) -> Result<Url, TransportError> {
        let target = self.base.join(location).map_err(|_| TransportError::InvalidUrl {
            url: location.to_string(),
        })?;
        let mut path = self.endpoints.page.trim_end_matches('/').to_string();
        path.push_str(target.path());
        let mut url = self.endpoint(&path)?;
        url.set_query(target.query());
        Ok(url)
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, TransportError> {
        let response = request
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %response.url(), "backend returned failure status");
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<R>().await.map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn navigate(
        &self,
        direction: Direction,
        request: NavigateRequest,
    ) -> Result<LocationResponse, TransportError> {
        let path = match direction {
            Direction::Next => &self.endpoints.next_article,
            Direction::Previous => &self.endpoints.back_article,
        };
        let url = self.endpoint(path)?;
        tracing::debug!(direction = direction.as_str(), %url, "navigate");
        self.send(self.client.post(url).form(&request)).await
    }

    async fn add_compound(
        &self,
        request: MutationRequest,
    ) -> Result<LocationResponse, TransportError> {
        let url = self.endpoint(&self.endpoints.add_compound)?;
        tracing::debug!(%url, compounds = request.compounds.len(), "add compound");
        self.send(self.client.post(url).json(&request)).await
    }

    async fn delete_compounds(
        &self,
        request: DeleteRequest,
    ) -> Result<LocationResponse, TransportError> {
        let url = self.endpoint(&self.endpoints.delete_compounds)?;
        tracing::debug!(%url, ids = ?request.ids, "delete compounds");
        self.send(self.client.post(url).json(&request)).await
    }

    async fn render_structure(
        &self,
        request: StructureRequest,
    ) -> Result<StructureResponse, TransportError> {
        let url = self.endpoint(&self.endpoints.render_structure)?;
        self.send(self.client.post(url).json(&request)).await
    }

    async fn load_page(&self, location: &str) -> Result<PageState, TransportError> {
        let url = self.page_url(location)?;
        tracing::debug!(%url, "load page");
        self.send(self.client.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HttpBackend {
        let config = BackendConfig {
            base_url: "https://curation.example.org/".to_string(),
            ..BackendConfig::default()
        };
        HttpBackend::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let backend = backend();
        assert_eq!(
            backend.endpoint("/data/addCompound").unwrap().as_str(),
            "https://curation.example.org/data/addCompound"
        );
    }

    #[test]
    fn test_page_url_from_relative_location() {
        let backend = backend();
        assert_eq!(
            backend.page_url("/article/42?compound=3").unwrap().as_str(),
            "https://curation.example.org/data/page/article/42?compound=3"
        );
    }

    #[test]
    fn test_page_url_from_absolute_location() {
        let backend = backend();
        assert_eq!(
            backend
                .page_url("https://curation.example.org/article/7")
                .unwrap()
                .as_str(),
            "https://curation.example.org/data/page/article/7"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = BackendConfig {
            base_url: "not a url".to_string(),
            ..BackendConfig::default()
        };
        assert!(matches!(
            HttpBackend::new(&config),
            Err(TransportError::InvalidUrl { .. })
        ));
    }
}
