use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use super::super::persist::{ForumJournal, ForumSnapshot, PersistError};
use super::super::types::{JOURNAL_VERSION, SNAPSHOT_VERSION};
use super::ForumKernel;

const SNAPSHOT_FILE: &str = "snapshot.json";
const JOURNAL_FILE: &str = "journal.json";

impl ForumKernel {
    pub fn snapshot(&self) -> ForumSnapshot {
        ForumSnapshot {
            version: SNAPSHOT_VERSION,
            time: self.time,
            config: self.config.clone(),
            model: self.model.clone(),
            next_event_id: self.next_event_id,
            next_action_id: self.next_action_id,
            pending_actions: self.pending_actions.iter().cloned().collect(),
            journal_len: self.journal.len(),
        }
    }

    pub fn journal_snapshot(&self) -> ForumJournal {
        ForumJournal {
            version: JOURNAL_VERSION,
            events: self.journal.clone(),
        }
    }

    pub fn from_snapshot(
        snapshot: ForumSnapshot,
        journal: ForumJournal,
    ) -> Result<Self, PersistError> {
        snapshot.validate_version()?;
        journal.validate_version()?;
        if snapshot.journal_len != journal.events.len() {
            return Err(PersistError::SnapshotMismatch {
                expected: snapshot.journal_len,
                actual: journal.events.len(),
            });
        }
        Ok(Self {
            time: snapshot.time,
            config: snapshot.config.sanitized(),
            next_event_id: snapshot.next_event_id,
            next_action_id: snapshot.next_action_id,
            pending_actions: VecDeque::from(snapshot.pending_actions),
            journal: journal.events,
            model: snapshot.model,
        })
    }

    pub fn replay_from_snapshot(
        snapshot: ForumSnapshot,
        journal: ForumJournal,
    ) -> Result<Self, PersistError> {
        snapshot.validate_version()?;
        journal.validate_version()?;
        if journal.events.len() < snapshot.journal_len {
            return Err(PersistError::SnapshotMismatch {
                expected: snapshot.journal_len,
                actual: journal.events.len(),
            });
        }
        if !snapshot.pending_actions.is_empty() && journal.events.len() > snapshot.journal_len {
            return Err(PersistError::ReplayConflict {
                message: "cannot replay with pending actions in snapshot".to_string(),
            });
        }

        let mut kernel = Self {
            time: snapshot.time,
            config: snapshot.config.sanitized(),
            next_event_id: snapshot.next_event_id,
            next_action_id: snapshot.next_action_id,
            pending_actions: VecDeque::from(snapshot.pending_actions),
            journal: journal.events.clone(),
            model: snapshot.model,
        };

        for event in journal.events.iter().skip(snapshot.journal_len) {
            kernel.apply_event(event)?;
        }
        let events_after_snapshot = journal.events.len() - snapshot.journal_len;
        if events_after_snapshot > 0 {
            kernel.next_action_id = kernel
                .next_action_id
                .saturating_add(events_after_snapshot as u64);
        }

        Ok(kernel)
    }

    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> Result<(), PersistError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        self.snapshot().save_json(dir.join(SNAPSHOT_FILE))?;
        self.journal_snapshot().save_json(dir.join(JOURNAL_FILE))?;
        Ok(())
    }

    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, PersistError> {
        let dir = dir.as_ref();
        let snapshot = ForumSnapshot::load_json(dir.join(SNAPSHOT_FILE))?;
        let journal = ForumJournal::load_json(dir.join(JOURNAL_FILE))?;
        Self::from_snapshot(snapshot, journal)
    }
}
