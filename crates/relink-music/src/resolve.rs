use relink_core::{MediaInfo, RelinkError, RelinkResult};
use tracing::debug;

use crate::api::itunes::ITunesClient;
use crate::api::spotify::SpotifyClient;
use crate::parsers::apple_music::AppleEntity;

pub async fn resolve_from_spotify(
    spotify: &SpotifyClient,
    path: &str,
    token: &str,
) -> RelinkResult<MediaInfo> {
    let album = spotify.album(path, token).await?;
    let artist = album.artists.into_iter().next().ok_or_else(|| {
        RelinkError::NoArtistData(format!("spotify object {path} lists no artists"))
    })?;
    debug!(artist = %artist.name, album = %album.name, "resolved spotify link");
    Ok(MediaInfo {
        artist: artist.name,
        album: album.name,
        track: None,
    })
}

/// Catalog ids are unique; the first lookup hit is taken as-is.
pub async fn resolve_from_apple(
    itunes: &ITunesClient,
    catalog_id: &str,
    entity: AppleEntity,
) -> RelinkResult<MediaInfo> {
    let item = itunes
        .lookup(catalog_id, entity.as_str())
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            RelinkError::NoResults(format!("itunes lookup found nothing for id {catalog_id}"))
        })?;

    let track = if item.is_track() {
        item.track_name.filter(|name| !name.is_empty())
    } else {
        None
    };
    let album = item.collection_name.ok_or_else(|| {
        RelinkError::Decode(format!(
            "itunes lookup result for id {catalog_id} ({entity}) has no collectionName"
        ))
    })?;
    debug!(artist = %item.artist_name, %album, "resolved apple music link");
    Ok(MediaInfo {
        artist: item.artist_name,
        album,
        track,
    })
}
