use std::fmt;

use relink_core::{MediaInfo, RelinkError, RelinkResult, Service};
use tracing::debug;

use crate::api::{ApiClients, Endpoints};
use crate::{query, ranker};

/// Search parameters for a Spotify destination, plus the bearer token the
/// search needs.
#[derive(Clone)]
pub struct SpotifyTarget {
    pub info: MediaInfo,
    token: String,
}

impl SpotifyTarget {
    pub fn new(info: MediaInfo, token: impl Into<String>) -> Self {
        Self {
            info,
            token: token.into(),
        }
    }
}

impl fmt::Debug for SpotifyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyTarget")
            .field("info", &self.info)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppleMusicTarget {
    pub info: MediaInfo,
}

/// A conversion request bound for one destination service.
#[derive(Debug, Clone)]
pub enum Link {
    Spotify(SpotifyTarget),
    AppleMusic(AppleMusicTarget),
}

impl Link {
    pub fn target_service(&self) -> Service {
        match self {
            Link::Spotify(_) => Service::Spotify,
            Link::AppleMusic(_) => Service::AppleMusic,
        }
    }

    pub fn info(&self) -> &MediaInfo {
        match self {
            Link::Spotify(target) => &target.info,
            Link::AppleMusic(target) => &target.info,
        }
    }

    /// The escaped search term for the destination's search endpoint.
    pub fn service_query(&self) -> String {
        match self {
            Link::Spotify(target) => query::spotify_search_query(
                &target.info.artist,
                &target.info.album,
                target.info.track.as_deref(),
            ),
            Link::AppleMusic(target) => {
                query::apple_search_query(&target.info.artist, &target.info.album)
            }
        }
    }

    pub fn base_url<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        match self {
            Link::Spotify(_) => &endpoints.spotify_api,
            Link::AppleMusic(_) => &endpoints.itunes,
        }
    }

    pub fn request_url(&self, endpoints: &Endpoints) -> String {
        let base = self.base_url(endpoints);
        let term = self.service_query();
        match self {
            Link::Spotify(_) => query::spotify_search_url(base, &term),
            Link::AppleMusic(_) => query::itunes_search_url(base, &term),
        }
    }

    /// Searches the destination service and returns the link of the album
    /// whose name is closest to the requested one.
    pub async fn converted_link(&self, apis: &ApiClients) -> RelinkResult<String> {
        let url = self.request_url(&apis.endpoints);
        let album = &self.info().album;
        match self {
            Link::Spotify(target) => {
                let items = apis.spotify.search_albums(&url, &target.token).await?;
                let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
                let best = ranker::best_match(&names, album).ok_or_else(|| {
                    RelinkError::NoResults(format!("spotify search returned no albums for '{album}'"))
                })?;
                debug!(candidates = items.len(), chosen = names[best], "ranked spotify albums");

                let link = &items[best].external_urls.spotify;
                if link.trim().is_empty() {
                    return Err(RelinkError::Decode(
                        "spotify search result is missing its external url".to_string(),
                    ));
                }
                Ok(link.clone())
            }
            Link::AppleMusic(_) => {
                let items = apis.itunes.search_albums(&url).await?;
                let names: Vec<&str> = items
                    .iter()
                    .map(|item| item.collection_name.as_str())
                    .collect();
                let best = ranker::best_match(&names, album).ok_or_else(|| {
                    RelinkError::NoResults(format!("itunes search returned no albums for '{album}'"))
                })?;
                debug!(candidates = items.len(), chosen = names[best], "ranked itunes albums");
                Ok(query::apple_music_album_url(items[best].collection_id))
            }
        }
    }
}
