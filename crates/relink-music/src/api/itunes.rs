use relink_core::RelinkResult;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::api::{read_json, request_error};
use crate::query;

/// Unauthenticated client for the iTunes lookup and search endpoints.
#[derive(Debug, Clone)]
pub struct ITunesClient {
    client: Client,
    base: String,
}

impl ITunesClient {
    pub fn new(client: Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    pub async fn lookup(&self, catalog_id: &str, entity: &str) -> RelinkResult<Vec<ITunesLookupItem>> {
        let url = query::itunes_lookup_url(&self.base, catalog_id, entity);
        debug!(%url, "itunes lookup");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| request_error("itunes lookup", err))?;
        let payload: ITunesResponse<ITunesLookupItem> = read_json(response, "itunes lookup").await?;
        Ok(payload.results)
    }

    pub async fn search_albums(&self, url: &str) -> RelinkResult<Vec<ITunesAlbum>> {
        debug!(%url, "itunes search");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| request_error("itunes search", err))?;
        let payload: ITunesResponse<ITunesAlbum> = read_json(response, "itunes search").await?;
        Ok(payload.results)
    }
}

#[derive(Debug, Deserialize)]
pub struct ITunesResponse<T> {
    pub results: Vec<T>,
}

/// A lookup hit. Its shape depends on the wrapper type: artists carry no
/// collection, tracks carry a track name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ITunesLookupItem {
    pub wrapper_type: Option<String>,
    pub artist_name: String,
    pub collection_name: Option<String>,
    pub track_name: Option<String>,
}

impl ITunesLookupItem {
    pub fn is_track(&self) -> bool {
        self.wrapper_type.as_deref() == Some("track")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ITunesAlbum {
    pub artist_name: String,
    pub collection_name: String,
    pub collection_id: u64,
}
