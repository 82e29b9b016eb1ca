use std::time::Duration;

use relink_core::{ConversionResult, RelinkError, RelinkResult};
use reqwest::Client;
use tracing::info;

use crate::api::spotify::{SpotifyAuth, SpotifyCredentials};
use crate::api::{ApiClients, Endpoints};
use crate::classifier;
use crate::link::Link;

const USER_AGENT: &str = concat!("relink/", env!("CARGO_PKG_VERSION"));

/// Converts Apple Music links into Spotify links and back.
///
/// Holds no per-conversion state: every call classifies, fetches a fresh
/// token and searches from scratch.
#[derive(Debug, Clone)]
pub struct MusicConverter {
    apis: ApiClients,
    auth: SpotifyAuth,
}

impl MusicConverter {
    pub fn new(credentials: SpotifyCredentials, timeout: Duration) -> RelinkResult<Self> {
        Self::with_endpoints(credentials, timeout, Endpoints::default())
    }

    pub fn with_endpoints(
        credentials: SpotifyCredentials,
        timeout: Duration,
        endpoints: Endpoints,
    ) -> RelinkResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| RelinkError::Config(format!("failed to build http client: {err}")))?;
        let auth = SpotifyAuth::new(client.clone(), endpoints.spotify_token.clone(), credentials);
        Ok(Self {
            apis: ApiClients::new(client, endpoints),
            auth,
        })
    }

    pub async fn classify(&self, url: &str) -> RelinkResult<Link> {
        classifier::classify(url, &self.apis, &self.auth).await
    }

    pub async fn convert(&self, url: &str) -> RelinkResult<ConversionResult> {
        let url = url.trim();
        let link = self.classify(url).await?;
        let target_url = link.converted_link(&self.apis).await?;
        let target_service = link.target_service();
        info!(source = %url, target = %target_url, service = %target_service, "converted link");

        Ok(ConversionResult {
            source_url: url.to_string(),
            target_url,
            source_service: target_service.opposite(),
            target_service,
            info: link.info().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_service_fails_before_any_request() {
        // Port 9 has no listener.
        let converter = MusicConverter::with_endpoints(
            SpotifyCredentials::new("id", "secret"),
            Duration::from_secs(1),
            Endpoints::local("http://127.0.0.1:9"),
        )
        .unwrap();
        let result = converter.convert("https://example.com/album/1").await;
        assert!(matches!(result, Err(RelinkError::UnknownService(_))));
    }

    #[test]
    fn converter_debug_leaves_out_credentials() {
        let converter = MusicConverter::new(
            SpotifyCredentials::new("my-client-id", "top-secret"),
            Duration::from_secs(1),
        )
        .unwrap();
        let printed = format!("{converter:?}");
        assert!(!printed.contains("my-client-id"));
        assert!(!printed.contains("top-secret"));
    }
}
