//! One JSON-lines file per entity collection, mirrored in memory.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::Entity;
use crate::errors::{AppResult, OptionExt};

/// Records plus the highest id ever handed out, which only grows.
struct Collection<T> {
    records: Vec<T>,
    last_id: i32,
}

/// In-memory collection backed by a file holding one JSON record per line.
///
/// The last assigned id lives in a `.seq` sibling so ids of deleted records
/// are never reissued, across restarts included. Writers hold the write lock
/// across the file rewrite, so the file and the in-memory copy never
/// disagree once a save has returned.
pub(crate) struct EntityStorage<T> {
    path: PathBuf,
    seq_path: PathBuf,
    not_found: &'static str,
    state: RwLock<Collection<T>>,
}

impl<T> EntityStorage<T>
where
    T: Entity + Clone + Serialize + DeserializeOwned + Send + Sync,
{
    /// Load the collection from `path`. A missing file is an empty
    /// collection; malformed lines are skipped.
    pub async fn open(path: PathBuf, not_found: &'static str) -> AppResult<Self> {
        let records: Vec<T> = match fs::read_to_string(&path).await {
            Ok(content) => parse_lines(&path, &content),
            Err(e) if e.kind() == IoErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let seq_path = path.with_extension("seq");
        let stored_seq = read_seq(&seq_path).await?;
        let last_id = records
            .iter()
            .map(Entity::id)
            .fold(stored_seq, i32::max);

        debug!(path = %path.display(), count = records.len(), last_id, "Loaded collection");

        Ok(Self {
            path,
            seq_path,
            not_found,
            state: RwLock::new(Collection { records, last_id }),
        })
    }

    /// Insert (id 0) or replace by id. Returns the persisted id.
    pub async fn save(&self, mut entity: T) -> AppResult<i32> {
        let mut state = self.state.write().await;
        let mut next = state.records.clone();

        entity.touch();
        let id = if entity.is_new() {
            let id = state.last_id + 1;
            // A crash after this write only burns the id
            self.persist_seq(id).await?;
            state.last_id = id;

            entity.set_id(id);
            next.push(entity);
            id
        } else {
            let id = entity.id();
            let slot = next
                .iter_mut()
                .find(|record| record.id() == id)
                .ok_or_not_found(self.not_found)?;
            *slot = entity;
            id
        };

        self.persist(&next).await?;
        state.records = next;

        Ok(id)
    }

    /// Remove the record with `id`. Absent ids are ignored.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.delete_where(|record| record.id() == id).await?;
        Ok(())
    }

    /// Remove every matching record and return how many went.
    pub async fn delete_where<P>(&self, predicate: P) -> AppResult<usize>
    where
        P: Fn(&T) -> bool,
    {
        let mut state = self.state.write().await;
        let (removed, next): (Vec<T>, Vec<T>) =
            state.records.iter().cloned().partition(|record| predicate(record));
        if removed.is_empty() {
            return Ok(0);
        }

        self.persist(&next).await?;
        state.records = next;

        Ok(removed.len())
    }

    /// Apply `change` to every matching record in one rewrite.
    pub async fn update_where<P, F>(&self, predicate: P, change: F) -> AppResult<usize>
    where
        P: Fn(&T) -> bool,
        F: Fn(&mut T),
    {
        let mut state = self.state.write().await;
        let mut next = state.records.clone();

        let mut changed = 0;
        for record in next.iter_mut().filter(|record| predicate(record)) {
            change(record);
            record.touch();
            changed += 1;
        }
        if changed == 0 {
            return Ok(0);
        }

        self.persist(&next).await?;
        state.records = next;

        Ok(changed)
    }

    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.state
            .read()
            .await
            .records
            .iter()
            .find(|record| predicate(record))
            .cloned()
    }

    pub async fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.state
            .read()
            .await
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<T> {
        self.state.read().await.records.clone()
    }

    /// Rewrite the whole file through a temporary sibling and rename.
    async fn persist(&self, records: &[T]) -> AppResult<()> {
        let mut buffer = String::new();
        for record in records {
            buffer.push_str(&serde_json::to_string(record)?);
            buffer.push('\n');
        }

        write_atomic(&self.path, buffer).await?;

        debug!(path = %self.path.display(), count = records.len(), "Persisted collection");
        Ok(())
    }

    async fn persist_seq(&self, last_id: i32) -> AppResult<()> {
        write_atomic(&self.seq_path, format!("{}\n", last_id)).await
    }
}

async fn write_atomic(path: &Path, content: String) -> AppResult<()> {
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);
    fs::write(&tmp_path, content).await?;
    fs::rename(&tmp_path, path).await?;
    Ok(())
}

/// Last id recorded in a sequence file; 0 when the file is missing or unreadable.
async fn read_seq(path: &Path) -> AppResult<i32> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(content.trim().parse().unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Ignoring malformed id sequence");
            0
        })),
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(0),
        Err(e) => Err(e.into()),
    }
}

fn parse_lines<T: DeserializeOwned>(path: &Path, content: &str) -> Vec<T> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    line = index + 1,
                    error = %e,
                    "Skipping malformed record"
                );
                None
            }
        })
        .collect()
}
