use relink_core::{RelinkError, RelinkResult, Service, validate_url};

use crate::api::ApiClients;
use crate::api::spotify::SpotifyAuth;
use crate::link::{AppleMusicTarget, Link, SpotifyTarget};
use crate::parsers::apple_music::{APPLE_MUSIC_HOST, AppleEntity, parse_apple_music_link};
use crate::parsers::spotify::{SPOTIFY_HOST, normalize_spotify_path};
use crate::resolve::{resolve_from_apple, resolve_from_spotify};

/// Where an input link came from and what identifies it there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLink {
    AppleMusic {
        catalog_id: String,
        entity: AppleEntity,
    },
    Spotify {
        path: String,
    },
}

impl SourceLink {
    pub fn service(&self) -> Service {
        match self {
            SourceLink::AppleMusic { .. } => Service::AppleMusic,
            SourceLink::Spotify { .. } => Service::Spotify,
        }
    }
}

/// Classifies a raw link by host without touching the network.
pub fn identify(raw: &str) -> RelinkResult<SourceLink> {
    let url = validate_url(raw.trim())?;
    match url.host_str() {
        Some(APPLE_MUSIC_HOST) => {
            let (catalog_id, entity) = parse_apple_music_link(&url).ok_or_else(|| {
                RelinkError::UnsupportedEntity(format!("no catalog id in apple music link {raw}"))
            })?;
            Ok(SourceLink::AppleMusic { catalog_id, entity })
        }
        Some(SPOTIFY_HOST) => Ok(SourceLink::Spotify {
            path: normalize_spotify_path(url.path()),
        }),
        Some(host) => Err(RelinkError::UnknownService(format!(
            "{host} is neither {APPLE_MUSIC_HOST} nor {SPOTIFY_HOST}"
        ))),
        None => Err(RelinkError::UnknownService(format!("{raw} has no host"))),
    }
}

/// Resolves a raw link into a conversion request for the opposite service.
///
/// A Spotify token is requested only once it is needed: after the iTunes
/// lookup for Apple links, before the album lookup for Spotify links.
pub async fn classify(raw: &str, apis: &ApiClients, auth: &SpotifyAuth) -> RelinkResult<Link> {
    match identify(raw)? {
        SourceLink::AppleMusic { catalog_id, entity } => {
            let info = resolve_from_apple(&apis.itunes, &catalog_id, entity).await?;
            let token = auth.request_token().await?;
            Ok(Link::Spotify(SpotifyTarget::new(info, token)))
        }
        SourceLink::Spotify { path } => {
            let token = auth.request_token().await?;
            let info = resolve_from_spotify(&apis.spotify, &path, &token).await?;
            Ok(Link::AppleMusic(AppleMusicTarget { info }))
        }
    }
}
