use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Service {
    AppleMusic,
    Spotify,
}

impl Service {
    pub fn display_name(self) -> &'static str {
        match self {
            Service::AppleMusic => "Apple Music",
            Service::Spotify => "Spotify",
        }
    }

    /// The service a link from `self` is converted into.
    pub fn opposite(self) -> Service {
        match self {
            Service::AppleMusic => Service::Spotify,
            Service::Spotify => Service::AppleMusic,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub artist: String,
    pub album: String,
    pub track: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub source_url: String,
    pub target_url: String,
    pub source_service: Service,
    pub target_service: Service,
    pub info: MediaInfo,
}

#[cfg(test)]
mod tests {
    use super::Service;

    #[test]
    fn opposite_swaps_services() {
        assert_eq!(Service::AppleMusic.opposite(), Service::Spotify);
        assert_eq!(Service::Spotify.opposite(), Service::AppleMusic);
    }
}
