mod error;
mod result;

pub use error::{RelinkError, RelinkResult};
pub use result::{ConversionResult, MediaInfo, Service};

pub fn validate_url(url: &str) -> RelinkResult<url::Url> {
    url::Url::parse(url).map_err(|err| RelinkError::InvalidUrl(format!("{url}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::validate_url;
    use crate::RelinkError;

    #[test]
    fn test_validate_url_valid_https() {
        assert!(validate_url("https://open.spotify.com/album/2VYo0PSqdxVTMI0ydKUtoL").is_ok());
        assert!(validate_url("https://music.apple.com/us/album/1440768467").is_ok());
    }

    #[test]
    fn test_validate_url_invalid() {
        let result = validate_url("not-a-url");
        assert!(matches!(result, Err(RelinkError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_url_error_message() {
        let result = validate_url("://no-scheme");
        match result {
            Err(RelinkError::InvalidUrl(msg)) => assert!(msg.contains("://no-scheme")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }
}
