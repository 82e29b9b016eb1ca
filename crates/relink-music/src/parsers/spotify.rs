use regex::Regex;

pub const SPOTIFY_HOST: &str = "open.spotify.com";

/// Drops a locale prefix such as `/intl-ja/` so the path reads `/<type>/<id>`.
pub fn normalize_spotify_path(path: &str) -> String {
    match Regex::new(r"^/intl-[a-z]{2}(?:-[A-Za-z]{2})?/") {
        Ok(regex) => regex.replace(path, "/").into_owned(),
        Err(_) => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_spotify_path;

    #[test]
    fn keeps_plain_path() {
        assert_eq!(
            normalize_spotify_path("/album/2VYo0PSqdxVTMI0ydKUtoL"),
            "/album/2VYo0PSqdxVTMI0ydKUtoL"
        );
    }

    #[test]
    fn strips_locale_prefix() {
        assert_eq!(
            normalize_spotify_path("/intl-ja/album/2VYo0PSqdxVTMI0ydKUtoL"),
            "/album/2VYo0PSqdxVTMI0ydKUtoL"
        );
        assert_eq!(
            normalize_spotify_path("/intl-pt-BR/album/2VYo0PSqdxVTMI0ydKUtoL"),
            "/album/2VYo0PSqdxVTMI0ydKUtoL"
        );
    }
}
