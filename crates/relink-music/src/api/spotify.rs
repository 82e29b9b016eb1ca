use std::fmt;

use relink_core::{RelinkError, RelinkResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::api::{read_json, request_error};
use crate::query;

/// Client-credentials pair for the Spotify accounts service.
#[derive(Clone)]
pub struct SpotifyCredentials {
    client_id: String,
    client_secret: String,
}

impl SpotifyCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl fmt::Debug for SpotifyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyCredentials")
            .field("client_id", &"<redacted>")
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Fetches bearer tokens with the client-credentials grant. No caching: every
/// call is a fresh token request.
#[derive(Debug, Clone)]
pub struct SpotifyAuth {
    client: Client,
    token_url: String,
    credentials: SpotifyCredentials,
}

impl SpotifyAuth {
    pub fn new(client: Client, token_url: impl Into<String>, credentials: SpotifyCredentials) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            credentials,
        }
    }

    pub async fn request_token(&self) -> RelinkResult<String> {
        debug!(url = %self.token_url, "requesting spotify token");
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    RelinkError::Timeout(format!("spotify token request: {err}"))
                } else {
                    RelinkError::AuthFailure(format!("spotify token request failed: {err}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelinkError::AuthFailure(format!(
                "spotify token error: status={status} body={body}"
            )));
        }

        let payload = response.json::<TokenResponse>().await.map_err(|err| {
            RelinkError::AuthFailure(format!("spotify token response parse failed: {err}"))
        })?;
        if payload.access_token.trim().is_empty() {
            return Err(RelinkError::AuthFailure(
                "spotify token response carried an empty access_token".to_string(),
            ));
        }
        Ok(payload.access_token)
    }
}

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    api_base: String,
}

impl SpotifyClient {
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    /// Looks up the object behind a web-player path such as `/album/<id>`.
    pub async fn album(&self, path: &str, token: &str) -> RelinkResult<SpotifyAlbum> {
        let url = query::spotify_album_url(&self.api_base, path);
        debug!(%url, "spotify album lookup");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| request_error("spotify album lookup", err))?;
        read_json(response, "spotify album lookup").await
    }

    pub async fn search_albums(&self, url: &str, token: &str) -> RelinkResult<Vec<SpotifyAlbum>> {
        debug!(%url, "spotify search");
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| request_error("spotify search", err))?;
        let payload: SpotifySearchResponse = read_json(response, "spotify search").await?;
        Ok(payload.albums.items)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SpotifySearchResponse {
    pub albums: SpotifyAlbumPage,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyAlbumPage {
    pub items: Vec<SpotifyAlbum>,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyAlbum {
    pub name: String,
    pub artists: Vec<SpotifyArtist>,
    pub external_urls: SpotifyExternalUrls,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyExternalUrls {
    pub spotify: String,
}
