//! Activity logger background job.
//!
//! Polls the repository on a fixed interval and logs every entity that
//! appeared since the previous poll. State lives in the logger itself and
//! the loop stops when the shutdown channel flips to `true`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::domain::Entity;
use crate::errors::AppResult;
use crate::infra::Repository;

/// Highest id reported so far, per collection
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Watermarks {
    pub users: i32,
    pub folders: i32,
    pub notes: i32,
}

pub struct ActivityLogger {
    repo: Arc<dyn Repository>,
    seen: Watermarks,
}

impl ActivityLogger {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self {
            repo,
            seen: Watermarks::default(),
        }
    }

    pub fn watermarks(&self) -> Watermarks {
        self.seen
    }

    /// Log entities created since the last poll and return their descriptions.
    pub async fn poll_once(&mut self) -> AppResult<Vec<String>> {
        let (users, folders, notes) = futures::try_join!(
            self.repo.get_users(),
            self.repo.get_folders(),
            self.repo.get_notes(),
        )?;

        let mut reported = Vec::new();
        self.seen.users = collect_new(&users, self.seen.users, &mut reported);
        self.seen.folders = collect_new(&folders, self.seen.folders, &mut reported);
        self.seen.notes = collect_new(&notes, self.seen.notes, &mut reported);

        for info in &reported {
            tracing::info!(target: "activity", "New {}", info);
        }
        Ok(reported)
    }

    /// Run until `shutdown` becomes `true`. Poll failures are logged and
    /// retried on the next tick.
    pub fn spawn(mut self, interval: Duration, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.poll_once().await {
                            tracing::warn!("Activity poll failed: {}", e);
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::debug!("Activity logger stopped");
        })
    }
}

fn collect_new<T: Entity>(entities: &[T], watermark: i32, reported: &mut Vec<String>) -> i32 {
    let mut highest = watermark;
    for entity in entities.iter().filter(|entity| entity.id() > watermark) {
        reported.push(entity.info());
        highest = highest.max(entity.id());
    }
    highest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Folder, Note};
    use crate::errors::AppError;
    use crate::infra::MockRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn folder(id: i32) -> Folder {
        let mut folder = Folder::new(format!("folder {}", id), 1).unwrap();
        folder.id = id;
        folder
    }

    fn note(id: i32) -> Note {
        let mut note = Note::new(format!("note {}", id), "content", 1, None).unwrap();
        note.id = id;
        note
    }

    #[tokio::test]
    async fn test_reports_only_new_entities() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut repo = MockRepository::new();
        repo.expect_get_users().returning(|| Ok(vec![]));
        repo.expect_get_folders().returning(|| Ok(vec![folder(1)]));
        repo.expect_get_notes().returning(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![note(1)])
            } else {
                Ok(vec![note(1), note(2)])
            }
        });

        let mut logger = ActivityLogger::new(Arc::new(repo));

        let first = logger.poll_once().await.unwrap();
        assert_eq!(first.len(), 2);

        let second = logger.poll_once().await.unwrap();
        assert_eq!(second.len(), 1);
        assert!(second[0].starts_with("Note #2"));
        assert_eq!(
            logger.watermarks(),
            Watermarks {
                users: 0,
                folders: 1,
                notes: 2
            }
        );
    }

    #[tokio::test]
    async fn test_failed_poll_keeps_state() {
        let mut repo = MockRepository::new();
        repo.expect_get_users()
            .returning(|| Err(AppError::internal("boom")));
        repo.expect_get_folders().returning(|| Ok(vec![folder(1)]));
        repo.expect_get_notes().returning(|| Ok(vec![]));

        let mut logger = ActivityLogger::new(Arc::new(repo));
        assert!(logger.poll_once().await.is_err());
        assert_eq!(logger.watermarks(), Watermarks::default());
    }

    #[tokio::test]
    async fn test_spawn_stops_on_shutdown() {
        let mut repo = MockRepository::new();
        repo.expect_get_users().returning(|| Ok(vec![]));
        repo.expect_get_folders().returning(|| Ok(vec![]));
        repo.expect_get_notes().returning(|| Ok(vec![]));

        let (tx, rx) = watch::channel(false);
        let handle = ActivityLogger::new(Arc::new(repo)).spawn(Duration::from_millis(5), rx);

        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
