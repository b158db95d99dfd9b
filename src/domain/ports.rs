use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::progression::SaveData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u64,
}

// Port for progression persistence used by the session use cases.
#[async_trait]
pub trait SaveStore: Send + Sync {
    async fn save(&self, data: &SaveData) -> Result<(), StoreError>;
    // Ok(None) means nothing has been saved yet.
    async fn load(&self) -> Result<Option<SaveData>, StoreError>;
}

// Port for the global ranking.
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    async fn top(&self) -> Result<Vec<LeaderboardEntry>, StoreError>;
}
