use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelinkError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("unknown service: {0}")]
    UnknownService(String),
    #[error("unsupported entity: {0}")]
    UnsupportedEntity(String),
    #[error("authentication failed: {0}")]
    AuthFailure(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    /// A deadline ran out. There is no separate cancelled kind: dropping a
    /// conversion future stops it and leaves no partial result behind.
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("no results: {0}")]
    NoResults(String),
    #[error("no artist data: {0}")]
    NoArtistData(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl RelinkError {
    /// Stable machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::UnknownService(_) => "unknown_service",
            Self::UnsupportedEntity(_) => "unsupported_entity",
            Self::AuthFailure(_) => "auth_failure",
            Self::Upstream(_) => "upstream",
            Self::Timeout(_) => "timeout",
            Self::Decode(_) => "decode",
            Self::NoResults(_) => "no_results",
            Self::NoArtistData(_) => "no_artist_data",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

pub type RelinkResult<T> = Result<T, RelinkError>;

#[cfg(test)]
mod tests {
    use super::RelinkError;

    #[test]
    fn display_carries_stage_context() {
        let err = RelinkError::NoResults("spotify search returned no albums".to_string());
        assert_eq!(
            err.to_string(),
            "no results: spotify search returned no albums"
        );
    }

    #[test]
    fn kind_is_stable() {
        assert_eq!(RelinkError::Timeout(String::new()).kind(), "timeout");
        assert_eq!(
            RelinkError::UnknownService(String::new()).kind(),
            "unknown_service"
        );
        assert_eq!(RelinkError::AuthFailure(String::new()).kind(), "auth_failure");
    }
}
