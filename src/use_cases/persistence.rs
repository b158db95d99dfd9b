use tracing::{debug, warn};

use crate::domain::errors::StoreError;
use crate::domain::ports::{LeaderboardEntry, LeaderboardSource, SaveStore};
use crate::domain::progression::SaveData;

/// Remote-first progress storage with a local copy used whenever the
/// backend is unreachable. Callers never see transport errors.
pub struct ProgressStore<R, L> {
    pub remote: R,
    pub local: L,
}

impl<R, L> ProgressStore<R, L>
where
    R: SaveStore,
    L: SaveStore,
{
    /// Returns true when the data landed in either store.
    pub async fn save(&self, data: &SaveData) -> bool {
        match self.remote.save(data).await {
            Ok(()) => {
                debug!(money = data.money, "progress saved remotely");
                true
            }
            Err(err) => {
                warn!(?err, "save backend offline, saving locally");
                match self.local.save(data).await {
                    Ok(()) => true,
                    Err(err) => {
                        warn!(?err, "local save failed");
                        false
                    }
                }
            }
        }
    }

    /// Remote data when the backend answers, otherwise the local copy.
    pub async fn load(&self) -> Option<SaveData> {
        match self.remote.load().await {
            Ok(data) => data,
            Err(err) => {
                warn!(?err, "save backend offline, loading locally");
                self.local.load().await.unwrap_or_else(|err| {
                    warn!(?err, "local load failed");
                    None
                })
            }
        }
    }
}

/// Shown when the backend answers but has no usable ranking.
pub fn house_leaderboard() -> Vec<LeaderboardEntry> {
    [
        ("AcePilot99", 150_000),
        ("BaronRed", 120_000),
        ("SkyWalker", 95_000),
        ("Goose", 80_000),
        ("Maverick", 500),
    ]
    .into_iter()
    .map(|(username, score)| LeaderboardEntry {
        username: username.to_string(),
        score,
    })
    .collect()
}

/// Shown when the backend cannot be reached at all.
pub fn offline_leaderboard() -> Vec<LeaderboardEntry> {
    vec![LeaderboardEntry {
        username: "OfflineUser".to_string(),
        score: 0,
    }]
}

pub async fn fetch_leaderboard<S: LeaderboardSource>(source: &S) -> Vec<LeaderboardEntry> {
    match source.top().await {
        Ok(entries) => entries,
        Err(StoreError::Rejected(status)) => {
            debug!(status, "leaderboard rejected, using house ranking");
            house_leaderboard()
        }
        Err(err) => {
            debug!(?err, "leaderboard offline");
            offline_leaderboard()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FailureFlags, FixedBoard, RecordingStore};

    fn sample() -> SaveData {
        SaveData {
            money: 1_200,
            missions_completed: 3,
            ..SaveData::default()
        }
    }

    #[tokio::test]
    async fn when_remote_accepts_then_local_is_untouched() {
        let store = ProgressStore {
            remote: RecordingStore::new(),
            local: RecordingStore::new(),
        };

        assert!(store.save(&sample()).await);
        assert_eq!(store.remote.saved(), Some(sample()));
        assert_eq!(store.local.writes(), 0);
    }

    #[tokio::test]
    async fn when_remote_is_offline_then_save_falls_back_to_local() {
        let store = ProgressStore {
            remote: RecordingStore::new().with_failures(FailureFlags {
                save: true,
                ..FailureFlags::default()
            }),
            local: RecordingStore::new(),
        };

        assert!(store.save(&sample()).await);
        assert_eq!(store.local.saved(), Some(sample()));
    }

    #[tokio::test]
    async fn when_both_stores_fail_then_save_reports_failure() {
        let failing = FailureFlags {
            save: true,
            load: true,
        };
        let store = ProgressStore {
            remote: RecordingStore::new().with_failures(failing),
            local: RecordingStore::new().with_failures(failing),
        };

        assert!(!store.save(&sample()).await);
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn when_remote_is_offline_then_load_reads_local_copy() {
        let store = ProgressStore {
            remote: RecordingStore::new().with_failures(FailureFlags {
                load: true,
                ..FailureFlags::default()
            }),
            local: RecordingStore::new().with_saved(sample()),
        };

        assert_eq!(store.load().await, Some(sample()));
    }

    #[tokio::test]
    async fn when_remote_answers_empty_then_local_copy_is_ignored() {
        let store = ProgressStore {
            remote: RecordingStore::new(),
            local: RecordingStore::new().with_saved(sample()),
        };

        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn leaderboard_falls_back_by_failure_kind() {
        let offline = fetch_leaderboard(&FixedBoard(Err(0))).await;
        assert_eq!(offline, offline_leaderboard());

        let rejected = fetch_leaderboard(&FixedBoard(Err(503))).await;
        assert_eq!(rejected.len(), 5);

        let live = vec![LeaderboardEntry {
            username: "Ana".to_string(),
            score: 42,
        }];
        assert_eq!(fetch_leaderboard(&FixedBoard(Ok(live.clone()))).await, live);
    }
}
