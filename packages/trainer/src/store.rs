//! JSON files for the session history, word progress and the unfinished-session snapshot

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use woordjes_algo::{
    common_mistakes, merge_word_progress, most_missed_words, record_wrong_answer, ItemId,
    PracticeItem, QueueSnapshot, SessionRecord, WordProgress, WrongAnswer,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ==================== History ====================

/// All stored sessions, oldest first. A missing file is an empty history.
pub fn load_history(path: &Path) -> Result<Vec<SessionRecord>, StoreError> {
    let mut sessions: Vec<SessionRecord> = read_json(path)?.unwrap_or_default();
    sessions.sort_by_key(|s| s.created_at);
    debug!(path = %path.display(), sessions = sessions.len(), "history loaded");
    Ok(sessions)
}

pub fn append_session(path: &Path, record: SessionRecord) -> Result<usize, StoreError> {
    let mut sessions = load_history(path)?;
    sessions.push(record);
    write_json(path, &sessions)?;
    info!(path = %path.display(), sessions = sessions.len(), "session saved");
    Ok(sessions.len())
}

// ==================== Word Progress ====================

/// Word counters and wrong answers of one set
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_id: Option<u64>,
    #[serde(default)]
    pub words: Vec<WordProgress>,
    #[serde(default)]
    pub wrong_answers: Vec<WrongAnswer>,
}

impl SetProgress {
    pub fn new(set_id: Option<u64>) -> Self {
        Self {
            set_id,
            ..Self::default()
        }
    }

    /// Times the word was answered, right or wrong
    pub fn times_shown(&self, word_id: ItemId) -> u32 {
        self.words
            .iter()
            .find(|p| p.word_id == word_id)
            .map(WordProgress::attempts)
            .unwrap_or(0)
    }

    /// Fold a finished session into the counters
    pub fn record_session<'a>(
        &mut self,
        correct_ids: &[ItemId],
        mistake_ids: &[ItemId],
        wrong_answers: impl IntoIterator<Item = (&'a PracticeItem, &'a str)>,
        now: DateTime<Utc>,
    ) {
        for updated in merge_word_progress(&self.words, correct_ids, mistake_ids, now) {
            match self.words.iter_mut().find(|p| p.word_id == updated.word_id) {
                Some(existing) => *existing = updated,
                None => self.words.push(updated),
            }
        }
        for (item, given) in wrong_answers {
            record_wrong_answer(&mut self.wrong_answers, item, given);
        }
    }

    pub fn most_missed(&self, limit: usize) -> Vec<&WordProgress> {
        most_missed_words(&self.words, limit)
    }

    pub fn common_mistakes(&self, item: &PracticeItem) -> Vec<String> {
        common_mistakes(&self.wrong_answers, item, self.times_shown(item.id))
    }
}

/// Progress of one set; an unknown set starts empty
pub fn load_progress(path: &Path, set_id: Option<u64>) -> Result<SetProgress, StoreError> {
    let sets: Vec<SetProgress> = read_json(path)?.unwrap_or_default();
    Ok(sets
        .into_iter()
        .find(|p| p.set_id == set_id)
        .unwrap_or_else(|| SetProgress::new(set_id)))
}

/// Replace the stored progress of `progress.set_id`, keeping other sets
pub fn save_progress(path: &Path, progress: &SetProgress) -> Result<(), StoreError> {
    let mut sets: Vec<SetProgress> = read_json(path)?.unwrap_or_default();
    match sets.iter_mut().find(|p| p.set_id == progress.set_id) {
        Some(existing) => *existing = progress.clone(),
        None => sets.push(progress.clone()),
    }
    write_json(path, &sets)?;
    info!(
        path = %path.display(),
        set_id = ?progress.set_id,
        words = progress.words.len(),
        "word progress saved"
    );
    Ok(())
}

// ==================== Snapshot ====================

pub fn load_snapshot(path: &Path) -> Result<Option<QueueSnapshot>, StoreError> {
    read_json(path)
}

pub fn save_snapshot(path: &Path, snapshot: &QueueSnapshot) -> Result<(), StoreError> {
    write_json(path, snapshot)?;
    info!(
        path = %path.display(),
        active = snapshot.active_words.len(),
        "session snapshot saved"
    );
    Ok(())
}

pub fn clear_snapshot(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
