use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    pub simple: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RelinkConfig {
    pub spotify: SpotifyConfig,
    pub http: HttpConfig,
    pub server: ServerConfig,
    pub output: OutputConfig,
}

#[cfg(test)]
mod tests {
    use super::RelinkConfig;

    #[test]
    fn parses_partial_file() {
        let config: RelinkConfig = toml::from_str(
            r#"
            [spotify]
            client_id = "abc"
            "#,
        )
        .unwrap();
        assert_eq!(config.spotify.client_id.as_deref(), Some("abc"));
        assert!(config.spotify.client_secret.is_none());
        assert!(config.http.timeout_secs.is_none());
        assert!(config.server.addr.is_none());
    }

    #[test]
    fn empty_file_is_default() {
        let config: RelinkConfig = toml::from_str("").unwrap();
        assert!(config.output.simple.is_none());
    }
}
