/// Record deletion with a single pending undo.
use anyhow::Result;

use crate::interactor::{RecordInteractor, RecordTypeInteractor};
use crate::types::{Record, RecordId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovePhase {
    Ready,
    Deleting,
    Removed,
    Restored,
}

/// Transient message offered after a removal. Holds the removed record so
/// the undo action can put it back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedMessage {
    pub text: String,
    pub action_text: &'static str,
    removed: Option<Record>,
}

impl RemovedMessage {
    pub fn removed_record(&self) -> Option<&Record> {
        self.removed.as_ref()
    }
}

#[derive(Clone, Debug)]
pub struct RemoveRecordState {
    pub delete_button_enabled: bool,
    pub delete_icon_visible: bool,
    pub message: Option<RemovedMessage>,
    pub need_update: bool,
    pub phase: RemovePhase,
    record_id: Option<RecordId>,
}

impl Default for RemoveRecordState {
    fn default() -> Self {
        Self {
            delete_button_enabled: false,
            delete_icon_visible: false,
            message: None,
            need_update: false,
            phase: RemovePhase::Ready,
            record_id: None,
        }
    }
}

impl RemoveRecordState {
    /// Targets a record. `None` stands for a record that was never stored.
    pub fn prepare(&mut self, record_id: Option<RecordId>) {
        self.record_id = record_id;
        self.delete_button_enabled = true;
        self.delete_icon_visible = record_id.is_some();
        self.phase = RemovePhase::Ready;
    }

    pub fn on_delete_click<S>(&mut self, store: &S) -> Result<()>
    where
        S: RecordInteractor + RecordTypeInteractor,
    {
        self.delete_button_enabled = false;
        let Some(record_id) = self.record_id else {
            return Ok(());
        };
        self.phase = RemovePhase::Deleting;

        let removed = RecordInteractor::get(store, record_id)?;
        let removed_name = match &removed {
            Some(record) => RecordTypeInteractor::get(store, record.type_id)?
                .map(|record_type| record_type.name)
                .unwrap_or_default(),
            None => String::new(),
        };

        RecordInteractor::remove(store, record_id)?;
        self.need_update = true;
        self.phase = RemovePhase::Removed;
        tracing::info!(record_id, name = %removed_name, "record removed");

        self.message = Some(RemovedMessage {
            text: format!("Record {removed_name} removed"),
            action_text: "Undo",
            removed,
        });
        Ok(())
    }

    /// Puts the removed record back under its original id.
    pub fn on_undo<S>(&mut self, store: &S) -> Result<()>
    where
        S: RecordInteractor,
    {
        let Some(message) = self.message.take() else {
            return Ok(());
        };
        if let Some(record) = message.removed {
            let id = RecordInteractor::add(store, &record)?;
            self.need_update = true;
            self.phase = RemovePhase::Restored;
            tracing::info!(record_id = id, "record restored");
        }
        Ok(())
    }

    pub fn on_message_shown(&mut self) {
        self.message = None;
    }

    pub fn on_updated(&mut self) {
        self.need_update = false;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use rusqlite::Connection;

    use super::*;
    use crate::db::{test_connection, test_record_type};

    fn stored_record(conn: &Connection) -> Record {
        let type_id = test_record_type("Reading", conn);
        let record = Record {
            id: None,
            type_id,
            time_started: Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            time_ended: Local.with_ymd_and_hms(2024, 1, 15, 9, 45, 0).unwrap(),
            comment: "chapter 3".to_string(),
        };
        let id = RecordInteractor::add(conn, &record).unwrap();
        RecordInteractor::get(conn, id).unwrap().unwrap()
    }

    #[test]
    fn prepare_sets_visibility() {
        let mut state = RemoveRecordState::default();
        state.prepare(None);
        assert!(state.delete_button_enabled);
        assert!(!state.delete_icon_visible);

        state.prepare(Some(4));
        assert!(state.delete_icon_visible);
    }

    #[test]
    fn delete_without_id_only_disables_button() {
        let conn = test_connection();
        let mut state = RemoveRecordState::default();
        state.prepare(None);
        state.on_delete_click(&conn).unwrap();
        assert!(!state.delete_button_enabled);
        assert!(state.message.is_none());
        assert!(!state.need_update);
        assert_eq!(state.phase, RemovePhase::Ready);
    }

    #[test]
    fn delete_then_undo_restores_exact_record() {
        let conn = test_connection();
        let original = stored_record(&conn);
        let mut state = RemoveRecordState::default();
        state.prepare(original.id);

        state.on_delete_click(&conn).unwrap();
        assert_eq!(state.phase, RemovePhase::Removed);
        assert!(state.need_update);
        assert!(RecordInteractor::get(&conn, original.id.unwrap()).unwrap().is_none());
        let message = state.message.clone().unwrap();
        assert_eq!(message.text, "Record Reading removed");
        assert_eq!(message.action_text, "Undo");
        assert_eq!(message.removed_record(), Some(&original));

        state.on_updated();
        state.on_undo(&conn).unwrap();
        assert_eq!(state.phase, RemovePhase::Restored);
        assert!(state.need_update);
        assert!(state.message.is_none());
        assert_eq!(
            RecordInteractor::get(&conn, original.id.unwrap()).unwrap(),
            Some(original)
        );
    }

    #[test]
    fn missing_record_gives_empty_name() {
        let conn = test_connection();
        let mut state = RemoveRecordState::default();
        state.prepare(Some(99));
        state.on_delete_click(&conn).unwrap();
        let message = state.message.clone().unwrap();
        assert_eq!(message.text, "Record  removed");
        assert!(message.removed_record().is_none());

        state.on_undo(&conn).unwrap();
        assert!(RecordInteractor::get_all(&conn).unwrap().is_empty());
    }

    #[test]
    fn dismissing_drops_the_undo() {
        let conn = test_connection();
        let original = stored_record(&conn);
        let mut state = RemoveRecordState::default();
        state.prepare(original.id);
        state.on_delete_click(&conn).unwrap();

        state.on_message_shown();
        state.on_undo(&conn).unwrap();
        assert!(RecordInteractor::get_all(&conn).unwrap().is_empty());
    }
}
