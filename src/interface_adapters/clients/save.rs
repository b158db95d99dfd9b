use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::errors::StoreError;
use crate::domain::ports::{LeaderboardEntry, LeaderboardSource, SaveStore};
use crate::domain::progression::SaveData;
use crate::interface_adapters::protocol::{LeaderboardEntryDto, SavePayload};

// Thin reqwest client for the save backend.
#[derive(Clone)]
pub struct HttpSaveStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSaveStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SaveStore for HttpSaveStore {
    async fn save(&self, data: &SaveData) -> Result<(), StoreError> {
        let response = self
            .http
            .post(self.url("/api/save"))
            .json(&SavePayload::from(data))
            .send()
            .await
            .map_err(|_| StoreError::Unavailable)?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(StoreError::Rejected(response.status().as_u16()))
    }

    async fn load(&self) -> Result<Option<SaveData>, StoreError> {
        let response = self
            .http
            .get(self.url("/api/load"))
            .send()
            .await
            .map_err(|_| StoreError::Unavailable)?;

        if !response.status().is_success() {
            return Err(StoreError::Rejected(response.status().as_u16()));
        }

        // The backend answers `null` for a player without progress.
        let payload = response
            .json::<Option<SavePayload>>()
            .await
            .map_err(|_| StoreError::Malformed)?;
        Ok(payload.map(SaveData::from))
    }
}

#[async_trait]
impl LeaderboardSource for HttpSaveStore {
    async fn top(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let response = self
            .http
            .get(self.url("/api/leaderboard"))
            .send()
            .await
            .map_err(|_| StoreError::Unavailable)?;

        if !response.status().is_success() {
            return Err(StoreError::Rejected(response.status().as_u16()));
        }

        let entries = response
            .json::<Vec<LeaderboardEntryDto>>()
            .await
            .map_err(|_| StoreError::Malformed)?;
        Ok(entries.into_iter().map(LeaderboardEntry::from).collect())
    }
}

// Local JSON save file used while the backend is offline.
#[derive(Debug, Clone)]
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SaveStore for FileSaveStore {
    async fn save(&self, data: &SaveData) -> Result<(), StoreError> {
        let json =
            serde_json::to_vec_pretty(&SavePayload::from(data)).map_err(|_| StoreError::Malformed)?;
        // Write then rename so a crash never leaves a truncated save.
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await.map_err(StoreError::Io)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(StoreError::Io)
    }

    async fn load(&self) -> Result<Option<SaveData>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        let payload =
            serde_json::from_slice::<SavePayload>(&bytes).map_err(|_| StoreError::Malformed)?;
        Ok(Some(payload.into()))
    }
}
