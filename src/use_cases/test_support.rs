use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::ports::{LeaderboardEntry, LeaderboardSource, SaveStore};
use crate::domain::progression::SaveData;

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub save: bool,
    pub load: bool,
}

// In-memory save slot that records every write.
#[derive(Clone)]
pub(crate) struct RecordingStore {
    slot: Arc<Mutex<Option<SaveData>>>,
    writes: Arc<Mutex<usize>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            writes: Arc::new(Mutex::new(0)),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn with_saved(self, data: SaveData) -> Self {
        *self.slot.lock().expect("slot mutex poisoned") = Some(data);
        self
    }

    pub(crate) fn saved(&self) -> Option<SaveData> {
        self.slot.lock().expect("slot mutex poisoned").clone()
    }

    pub(crate) fn writes(&self) -> usize {
        *self.writes.lock().expect("writes mutex poisoned")
    }
}

#[async_trait]
impl SaveStore for RecordingStore {
    async fn save(&self, data: &SaveData) -> Result<(), StoreError> {
        if self.failures.save {
            return Err(StoreError::Unavailable);
        }
        *self.slot.lock().expect("slot mutex poisoned") = Some(data.clone());
        *self.writes.lock().expect("writes mutex poisoned") += 1;
        Ok(())
    }

    async fn load(&self) -> Result<Option<SaveData>, StoreError> {
        if self.failures.load {
            return Err(StoreError::Unavailable);
        }
        Ok(self.slot.lock().expect("slot mutex poisoned").clone())
    }
}

// Leaderboard source returning a fixed answer.
pub(crate) struct FixedBoard(pub(crate) Result<Vec<LeaderboardEntry>, u16>);

#[async_trait]
impl LeaderboardSource for FixedBoard {
    async fn top(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        match &self.0 {
            Ok(entries) => Ok(entries.clone()),
            Err(0) => Err(StoreError::Unavailable),
            Err(status) => Err(StoreError::Rejected(*status)),
        }
    }
}
