use urlencoding::encode;

pub const SEARCH_TYPE: &str = "album";
pub const SPOTIFY_MARKET: &str = "US";
pub const ITUNES_COUNTRY: &str = "us";

const APPLE_MUSIC_ALBUM_BASE: &str = "https://music.apple.com/us/album";

/// `artist:<artist> album:<album>[ track:<track>]`, encoded as one value.
pub fn spotify_search_query(artist: &str, album: &str, track: Option<&str>) -> String {
    let mut query = format!("artist:{artist} album:{album}");
    if let Some(track) = track.filter(|track| !track.is_empty()) {
        query.push_str(" track:");
        query.push_str(track);
    }
    encode(&query).into_owned()
}

/// `<artist>+<album>`; the literal `+` is the iTunes term separator.
pub fn apple_search_query(artist: &str, album: &str) -> String {
    format!("{}+{}", encode(artist), encode(album))
}

pub fn spotify_search_url(api_base: &str, query: &str) -> String {
    format!("{api_base}/search?q={query}&type={SEARCH_TYPE}")
}

pub fn itunes_search_url(itunes_base: &str, query: &str) -> String {
    format!("{itunes_base}/search?term={query}&entity={SEARCH_TYPE}")
}

pub fn itunes_lookup_url(itunes_base: &str, catalog_id: &str, entity: &str) -> String {
    format!(
        "{itunes_base}/lookup?id={}&country={ITUNES_COUNTRY}&entity={entity}",
        encode(catalog_id)
    )
}

/// Spotify web paths read `/album/<id>`, the API wants `/albums/<id>`.
pub fn spotify_album_url(api_base: &str, path: &str) -> String {
    let path = path.replacen("album", "albums", 1);
    format!("{api_base}{path}?market={SPOTIFY_MARKET}")
}

pub fn apple_music_album_url(collection_id: u64) -> String {
    format!("{APPLE_MUSIC_ALBUM_BASE}/{collection_id}")
}
