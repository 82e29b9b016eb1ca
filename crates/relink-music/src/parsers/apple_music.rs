use std::fmt;

use url::Url;

pub const APPLE_MUSIC_HOST: &str = "music.apple.com";

/// iTunes lookup entity for the kind of page a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppleEntity {
    Album,
    MusicArtist,
    MusicTrack,
    Music,
}

impl AppleEntity {
    pub fn from_kind(kind: Option<&str>) -> Self {
        match kind {
            Some("album") => AppleEntity::Album,
            Some("artist") => AppleEntity::MusicArtist,
            Some("song") => AppleEntity::MusicTrack,
            _ => AppleEntity::Music,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppleEntity::Album => "album",
            AppleEntity::MusicArtist => "musicArtist",
            AppleEntity::MusicTrack => "musicTrack",
            AppleEntity::Music => "music",
        }
    }
}

impl fmt::Display for AppleEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog id and entity of a `music.apple.com` link.
///
/// Paths look like `/<storefront>/<kind>/<slug>/<id>`; the kind sits in the
/// second segment and the id is the last one. A song opened from an album
/// page carries its own id in the `i` query parameter.
pub fn parse_apple_music_link(url: &Url) -> Option<(String, AppleEntity)> {
    if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "i")
        && !value.is_empty()
    {
        return Some((value.into_owned(), AppleEntity::MusicTrack));
    }

    let segments: Vec<&str> = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .collect();
    let catalog_id = segments.last()?;
    let entity = AppleEntity::from_kind(segments.get(1).copied());
    Some((catalog_id.to_string(), entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Option<(String, AppleEntity)> {
        parse_apple_music_link(&Url::parse(input).unwrap())
    }

    #[test]
    fn parses_album_link() {
        assert_eq!(
            parse("https://music.apple.com/us/album/who-made-who/1440768467"),
            Some(("1440768467".to_string(), AppleEntity::Album))
        );
    }

    #[test]
    fn maps_page_kinds_to_entities() {
        assert_eq!(
            parse("https://music.apple.com/us/artist/the-armed/580347042").map(|(_, e)| e),
            Some(AppleEntity::MusicArtist)
        );
        assert_eq!(
            parse("https://music.apple.com/us/song/airbag/1097862062").map(|(_, e)| e),
            Some(AppleEntity::MusicTrack)
        );
        assert_eq!(
            parse("https://music.apple.com/us/playlist/chill/pl.123").map(|(_, e)| e),
            Some(AppleEntity::Music)
        );
    }

    #[test]
    fn parses_track_id_from_query() {
        let url = "https://music.apple.com/us/album/blinding-lights/1496794033?i=1496794038";
        assert_eq!(
            parse(url),
            Some(("1496794038".to_string(), AppleEntity::MusicTrack))
        );
    }

    #[test]
    fn ignores_trailing_slash() {
        assert_eq!(
            parse("https://music.apple.com/us/album/1440768467/"),
            Some(("1440768467".to_string(), AppleEntity::Album))
        );
    }

    #[test]
    fn empty_path_has_no_identifier() {
        assert_eq!(parse("https://music.apple.com/"), None);
        assert_eq!(parse("https://music.apple.com"), None);
    }
}
