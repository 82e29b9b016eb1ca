pub mod itunes;
pub mod spotify;

use relink_core::{RelinkError, RelinkResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::api::itunes::ITunesClient;
use crate::api::spotify::SpotifyClient;

const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const ITUNES_BASE: &str = "https://itunes.apple.com";

/// Base URLs of every service the converter talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub spotify_api: String,
    pub spotify_token: String,
    pub itunes: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            spotify_api: SPOTIFY_API_BASE.to_string(),
            spotify_token: SPOTIFY_TOKEN_URL.to_string(),
            itunes: ITUNES_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// All services served from one host, laid out like the real APIs.
    pub fn local(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            spotify_api: format!("{base}/v1"),
            spotify_token: format!("{base}/api/token"),
            itunes: base.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClients {
    pub endpoints: Endpoints,
    pub spotify: SpotifyClient,
    pub itunes: ITunesClient,
}

impl ApiClients {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self {
            spotify: SpotifyClient::new(client.clone(), endpoints.spotify_api.clone()),
            itunes: ITunesClient::new(client, endpoints.itunes.clone()),
            endpoints,
        }
    }
}

pub(crate) fn request_error(context: &str, err: reqwest::Error) -> RelinkError {
    if err.is_timeout() {
        RelinkError::Timeout(format!("{context} request: {err}"))
    } else {
        RelinkError::Upstream(format!("{context} request failed: {err}"))
    }
}

/// Checks the status, then decodes the body. Missing or mistyped fields are
/// decode errors.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> RelinkResult<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(RelinkError::Upstream(format!(
            "{context} error: status={status} body={body}"
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|err| request_error(context, err))?;
    serde_json::from_str(&body)
        .map_err(|err| RelinkError::Decode(format!("{context} response parse failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::Endpoints;

    #[test]
    fn local_endpoints_mirror_production_layout() {
        let endpoints = Endpoints::local("http://127.0.0.1:1234/");
        assert_eq!(endpoints.spotify_api, "http://127.0.0.1:1234/v1");
        assert_eq!(endpoints.spotify_token, "http://127.0.0.1:1234/api/token");
        assert_eq!(endpoints.itunes, "http://127.0.0.1:1234");
    }

    #[test]
    fn default_endpoints_point_at_public_apis() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.spotify_api, "https://api.spotify.com/v1");
        assert_eq!(endpoints.itunes, "https://itunes.apple.com");
    }
}
