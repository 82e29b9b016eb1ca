mod config;

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use crate::config::RelinkConfig;
use relink_core::{RelinkError, RelinkResult};

pub use config::{
    DEFAULT_SERVER_ADDR, DEFAULT_TIMEOUT_SECS, HttpConfig, OutputConfig,
    RelinkConfig as RelinkConfigData, ServerConfig, SpotifyConfig,
};

pub const ENV_CLIENT_ID: &str = "RELINK_SPOTIFY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "RELINK_SPOTIFY_CLIENT_SECRET";
pub const ENV_TIMEOUT: &str = "RELINK_HTTP_TIMEOUT";
pub const ENV_SERVER_ADDR: &str = "RELINK_SERVER_ADDR";
pub const ENV_OUTPUT_SIMPLE: &str = "RELINK_OUTPUT_SIMPLE";

pub fn config_path() -> RelinkResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| RelinkError::Config("home directory not found".to_string()))?;
    Ok(home.join(".relink").join("config.toml"))
}

pub fn load_config() -> RelinkResult<RelinkConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(RelinkConfig::default());
    }
    let content = fs::read_to_string(&path)
        .map_err(|err| RelinkError::Config(format!("failed to read config: {err}")))?;
    let config = toml::from_str(&content)
        .map_err(|err| RelinkError::Config(format!("failed to parse config: {err}")))?;
    Ok(config)
}

pub fn save_config(config: &RelinkConfig) -> RelinkResult<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| RelinkError::Config(format!("failed to create config dir: {err}")))?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|err| RelinkError::Config(format!("failed to serialize config: {err}")))?;
    fs::write(&path, content)
        .map_err(|err| RelinkError::Config(format!("failed to write config: {err}")))?;
    Ok(())
}

pub fn config_exists() -> RelinkResult<bool> {
    let path = config_path()?;
    Ok(path.exists())
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Client id and secret, environment first, then the config file.
pub fn resolve_spotify_credentials(config: &RelinkConfig) -> RelinkResult<(String, String)> {
    resolve_spotify_credentials_with(config, env_value)
}

fn resolve_spotify_credentials_with(
    config: &RelinkConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> RelinkResult<(String, String)> {
    let client_id = lookup(ENV_CLIENT_ID)
        .or_else(|| config.spotify.client_id.clone())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            RelinkError::Config(format!(
                "spotify client id missing (set {ENV_CLIENT_ID} or spotify.client_id)"
            ))
        })?;
    let client_secret = lookup(ENV_CLIENT_SECRET)
        .or_else(|| config.spotify.client_secret.clone())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            RelinkError::Config(format!(
                "spotify client secret missing (set {ENV_CLIENT_SECRET} or spotify.client_secret)"
            ))
        })?;
    Ok((client_id, client_secret))
}

pub fn resolve_timeout(config: &RelinkConfig) -> RelinkResult<Duration> {
    resolve_timeout_with(config, env_value)
}

fn resolve_timeout_with(
    config: &RelinkConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> RelinkResult<Duration> {
    let secs = match lookup(ENV_TIMEOUT) {
        Some(value) => value.trim().parse::<u64>().map_err(|err| {
            RelinkError::Config(format!("invalid {ENV_TIMEOUT} '{value}': {err}"))
        })?,
        None => config.http.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };
    if secs == 0 {
        return Err(RelinkError::Config(
            "http timeout must be at least one second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

pub fn resolve_server_addr(config: &RelinkConfig) -> String {
    env_value(ENV_SERVER_ADDR)
        .or_else(|| config.server.addr.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string())
}

pub fn resolve_simple_output(config: &RelinkConfig) -> Option<bool> {
    if let Some(value) = env_value(ENV_OUTPUT_SIMPLE) {
        let normalized = value.to_lowercase();
        return Some(normalized == "1" || normalized == "true" || normalized == "yes");
    }
    config.output.simple
}

pub fn set_config_value(key_path: &str, value: &str) -> RelinkResult<()> {
    let path = config_path()?;
    let content = if path.exists() {
        fs::read_to_string(&path)
            .map_err(|err| RelinkError::Config(format!("failed to read config: {err}")))?
    } else {
        String::new()
    };

    let updated = updated_config(&content, key_path, value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| RelinkError::Config(format!("failed to create config dir: {err}")))?;
    }
    fs::write(&path, updated)
        .map_err(|err| RelinkError::Config(format!("failed to write config: {err}")))?;

    Ok(())
}

/// A file that does not parse is left alone rather than replaced.
fn updated_config(content: &str, key_path: &str, value: &str) -> RelinkResult<String> {
    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|err| RelinkError::Config(format!("failed to parse config: {err}")))?;
    apply_config_value(&mut doc, key_path, value)?;
    Ok(doc.to_string())
}

fn apply_config_value(
    doc: &mut toml_edit::DocumentMut,
    key_path: &str,
    value: &str,
) -> RelinkResult<()> {
    let parts: Vec<&str> = key_path.split('.').collect();
    let Some((last_part, sections)) = parts.split_last() else {
        return Err(RelinkError::Config("empty key path".to_string()));
    };
    if sections.is_empty() {
        return Err(RelinkError::Config(
            "key path must have at least 2 parts (e.g., 'spotify.client_id')".to_string(),
        ));
    }

    let mut current = doc.as_table_mut();
    for part in sections {
        current = current
            .entry(part)
            .or_insert(toml_edit::Item::Table(Default::default()))
            .as_table_mut()
            .ok_or_else(|| {
                RelinkError::Config(format!("cannot set nested value in '{key_path}'"))
            })?;
    }

    current[*last_part] = typed_value(key_path, value)?;
    Ok(())
}

// Numeric and boolean keys are stored typed so the file still deserializes.
fn typed_value(key_path: &str, value: &str) -> RelinkResult<toml_edit::Item> {
    match key_path {
        "http.timeout_secs" => value
            .trim()
            .parse::<i64>()
            .map(toml_edit::value)
            .map_err(|err| RelinkError::Config(format!("invalid value for {key_path}: {err}"))),
        "output.simple" => value
            .trim()
            .parse::<bool>()
            .map(toml_edit::value)
            .map_err(|err| RelinkError::Config(format!("invalid value for {key_path}: {err}"))),
        _ => Ok(toml_edit::value(value)),
    }
}

pub fn open_in_editor() -> RelinkResult<()> {
    let path = config_path()?;
    if !path.exists() {
        save_config(&RelinkConfig::default())?;
    }

    let editor = env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(target_os = "windows") {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "vim".to_string()
        } else {
            "nano".to_string()
        }
    });

    let status = Command::new(&editor).arg(&path).status().map_err(|err| {
        RelinkError::Config(format!("failed to open editor '{editor}': {err}"))
    })?;

    if !status.success() {
        return Err(RelinkError::Config(format!(
            "editor exited with status: {status}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn credentials_come_from_file_without_env() {
        let mut config = RelinkConfig::default();
        config.spotify.client_id = Some("id".to_string());
        config.spotify.client_secret = Some("secret".to_string());
        let (id, secret) = resolve_spotify_credentials_with(&config, no_env).unwrap();
        assert_eq!(id, "id");
        assert_eq!(secret, "secret");
    }

    #[test]
    fn env_overrides_file_credentials() {
        let mut config = RelinkConfig::default();
        config.spotify.client_id = Some("file-id".to_string());
        config.spotify.client_secret = Some("file-secret".to_string());
        let lookup = |key: &str| (key == ENV_CLIENT_ID).then(|| "env-id".to_string());
        let (id, secret) = resolve_spotify_credentials_with(&config, lookup).unwrap();
        assert_eq!(id, "env-id");
        assert_eq!(secret, "file-secret");
    }

    #[test]
    fn missing_secret_is_config_error() {
        let mut config = RelinkConfig::default();
        config.spotify.client_id = Some("id".to_string());
        let result = resolve_spotify_credentials_with(&config, no_env);
        match result {
            Err(RelinkError::Config(msg)) => assert!(msg.contains("client secret")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn timeout_defaults_and_rejects_zero() {
        let mut config = RelinkConfig::default();
        assert_eq!(
            resolve_timeout_with(&config, no_env).unwrap(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        config.http.timeout_secs = Some(0);
        assert!(matches!(
            resolve_timeout_with(&config, no_env),
            Err(RelinkError::Config(_))
        ));
        let lookup = |key: &str| (key == ENV_TIMEOUT).then(|| "3".to_string());
        assert_eq!(
            resolve_timeout_with(&config, lookup).unwrap(),
            Duration::from_secs(3)
        );
    }

    #[test]
    fn apply_config_value_writes_typed_entries() {
        let mut doc = toml_edit::DocumentMut::new();
        apply_config_value(&mut doc, "spotify.client_id", "abc").unwrap();
        apply_config_value(&mut doc, "http.timeout_secs", "5").unwrap();
        apply_config_value(&mut doc, "output.simple", "true").unwrap();

        let parsed: RelinkConfig = toml::from_str(&doc.to_string()).unwrap();
        assert_eq!(parsed.spotify.client_id.as_deref(), Some("abc"));
        assert_eq!(parsed.http.timeout_secs, Some(5));
        assert_eq!(parsed.output.simple, Some(true));
    }

    #[test]
    fn apply_config_value_rejects_flat_keys() {
        let mut doc = toml_edit::DocumentMut::new();
        assert!(matches!(
            apply_config_value(&mut doc, "client_id", "abc"),
            Err(RelinkError::Config(_))
        ));
        assert!(matches!(
            apply_config_value(&mut doc, "http.timeout_secs", "soon"),
            Err(RelinkError::Config(_))
        ));
    }

    #[test]
    fn malformed_config_is_rejected_not_overwritten() {
        let content = "[spotify]\nclient_id = \"keep-me\"\nclient_secret = \"keep-me-too\"\n[http\n";
        let result = updated_config(content, "http.timeout_secs", "5");
        match result {
            Err(RelinkError::Config(msg)) => assert!(msg.contains("failed to parse config")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn update_keeps_existing_entries() {
        let content = "[spotify]\nclient_id = \"keep-me\"\n";
        let updated = updated_config(content, "http.timeout_secs", "5").unwrap();
        assert!(updated.contains("client_id = \"keep-me\""));
        assert!(updated.contains("timeout_secs = 5"));
        let empty = updated_config("", "spotify.client_id", "fresh").unwrap();
        assert!(empty.contains("client_id = \"fresh\""));
    }
}
