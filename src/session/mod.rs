//! Per-cell edit lifecycle
//!
//! One [`EditSession`] exists per editable value cell. It owns the draft, the
//! last committed value and the caret, and decides when a commit is sent.
//!
//! # States
//!
//! ```text
//!            focus                 blur (draft != committed)
//!   Idle ──────────────► Editing ──────────────────────────► Committing
//!    ▲                    │  ▲                                   │  │
//!    │  blur (unchanged)  │  │        failure: draft reset,      │  │
//!    ├────────────────────┘  └──────── error recorded ───────────┘  │
//!    │  Escape: draft discarded                                     │
//!    └──────────────────────────── success ─────────────────────────┘
//! ```
//!
//! Enter behaves as blur. While Committing the session is busy: keystrokes
//! still edit the draft but no second commit can start until the first one
//! resolves. Failed commits are not retried; the draft falls back to the last
//! committed value and the user has to retype.
//!
//! The session never talks to the network. [`EditSession::blur`] hands back a
//! [`CommitRequest`]; the caller sends it and reports the result through
//! [`EditSession::commit_succeeded`] or [`EditSession::commit_failed`].

pub mod caret;

pub use caret::CaretTracker;

use crate::client::UpdateBatch;
use crate::index::RecordScope;
use crate::models::TranslationUpdate;
use tracing::{debug, warn};

/// Lifecycle state of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing,
    Committing,
}

/// A single-key update to send upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    /// Selection the edit was made under
    pub scope: RecordScope,
    pub key: String,
    pub value: String,
    pub updated_by: String,
}

impl CommitRequest {
    /// Request body for the update endpoint
    #[must_use]
    pub fn to_batch(&self) -> UpdateBatch {
        let mut batch = UpdateBatch::new();
        batch.insert(
            self.key.clone(),
            TranslationUpdate { value: self.value.clone(), updated_by: self.updated_by.clone() },
        );
        batch
    }
}

/// Edit state machine for one cell
#[derive(Debug, Clone)]
pub struct EditSession {
    scope: RecordScope,
    key: String,
    committed: String,
    draft: String,
    caret: CaretTracker,
    state: EditState,
    pending: Option<CommitRequest>,
    last_error: Option<String>,
}

impl EditSession {
    /// Session for `key` in `scope`, starting from its committed value
    #[must_use]
    pub fn new(scope: RecordScope, key: impl Into<String>, committed: impl Into<String>) -> Self {
        let committed = committed.into();
        Self {
            scope,
            key: key.into(),
            draft: committed.clone(),
            committed,
            caret: CaretTracker::default(),
            state: EditState::Idle,
            pending: None,
            last_error: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> EditState {
        self.state
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn scope(&self) -> &RecordScope {
        &self.scope
    }

    /// Last value confirmed upstream (or loaded)
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Current draft text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Text the cell shows
    ///
    /// While Idle this is the committed value; otherwise the user's draft.
    #[must_use]
    pub fn display(&self) -> &str {
        match self.state {
            EditState::Idle => &self.committed,
            EditState::Editing | EditState::Committing => &self.draft,
        }
    }

    /// A commit is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state == EditState::Committing
    }

    /// The in-flight request, if any
    #[must_use]
    pub const fn pending(&self) -> Option<&CommitRequest> {
        self.pending.as_ref()
    }

    /// Message of the last failed commit
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Caret position (character index) to restore after a re-render
    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret.resolve(&self.draft)
    }

    const fn accepts_input(&self) -> bool {
        matches!(self.state, EditState::Editing | EditState::Committing)
    }

    /// User focused the cell
    pub fn focus(&mut self) {
        if self.state != EditState::Idle {
            return;
        }
        self.state = EditState::Editing;
        self.draft = self.committed.clone();
        self.caret.reset();
        self.last_error = None;
    }

    /// Replace the draft with `text` as reported by the input surface
    ///
    /// `caret` is the character offset observed with the event; `None` puts
    /// the caret at the end. Ignored while Idle.
    pub fn input(&mut self, text: impl Into<String>, caret: Option<usize>) {
        if !self.accepts_input() {
            return;
        }
        self.draft = text.into();
        match caret {
            Some(offset) => self.caret.observe(offset),
            None => self.caret.reset(),
        }
    }

    /// Insert a character at the caret
    pub fn insert_char(&mut self, c: char) {
        if !self.accepts_input() {
            return;
        }
        let cursor = self.caret();
        let byte_idx = self.caret.byte_index(&self.draft);
        self.draft.insert(byte_idx, c);
        self.caret.observe(cursor + 1);
    }

    /// Delete the character before the caret
    pub fn backspace(&mut self) {
        let cursor = self.caret();
        if !self.accepts_input() || cursor == 0 {
            return;
        }
        let byte_idx = self.caret.byte_index(&self.draft);
        let prev_byte_idx = self.draft[..byte_idx]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        self.draft.remove(prev_byte_idx);
        self.caret.observe(cursor - 1);
    }

    /// Delete the character at the caret
    pub fn delete(&mut self) {
        if !self.accepts_input() {
            return;
        }
        let cursor = self.caret();
        let byte_idx = self.caret.byte_index(&self.draft);
        if byte_idx < self.draft.len() {
            self.draft.remove(byte_idx);
        }
        self.caret.observe(cursor);
    }

    pub fn cursor_left(&mut self) {
        let cursor = self.caret();
        if cursor > 0 {
            self.caret.observe(cursor - 1);
        }
    }

    pub fn cursor_right(&mut self) {
        let cursor = self.caret();
        if cursor < self.draft.chars().count() {
            self.caret.observe(cursor + 1);
        }
    }

    pub fn cursor_home(&mut self) {
        self.caret.observe(0);
    }

    pub fn cursor_end(&mut self) {
        self.caret.reset();
    }

    /// User left the cell
    ///
    /// Returns the request to send when the draft differs from the committed
    /// value. An unchanged draft goes straight back to Idle. Nothing happens
    /// while Idle or while a commit is already in flight.
    pub fn blur(&mut self) -> Option<CommitRequest> {
        if self.state != EditState::Editing {
            return None;
        }

        if self.draft == self.committed {
            self.state = EditState::Idle;
            self.caret.reset();
            return None;
        }

        let request = CommitRequest {
            scope: self.scope.clone(),
            key: self.key.clone(),
            value: self.draft.clone(),
            updated_by: self.scope.project_id.clone(),
        };
        debug!(key = %self.key, "commit started");
        self.state = EditState::Committing;
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Enter while editing: same as leaving the cell
    pub fn press_enter(&mut self) -> Option<CommitRequest> {
        self.blur()
    }

    /// Escape while editing: discard the draft without any network call
    pub fn press_escape(&mut self) {
        if self.state != EditState::Editing {
            return;
        }
        self.draft = self.committed.clone();
        self.caret.reset();
        self.state = EditState::Idle;
    }

    /// Upstream acknowledged the in-flight commit
    ///
    /// The submitted value becomes the committed value. If the user kept
    /// typing while the request was in flight the session stays in Editing
    /// with that draft, so the next blur commits it.
    pub fn commit_succeeded(&mut self) {
        if self.state != EditState::Committing {
            return;
        }
        let Some(request) = self.pending.take() else {
            return;
        };

        self.committed = request.value;
        self.last_error = None;
        if self.draft == self.committed {
            self.state = EditState::Idle;
            self.caret.reset();
        } else {
            self.state = EditState::Editing;
        }
        debug!(key = %self.key, state = ?self.state, "commit acknowledged");
    }

    /// The in-flight commit failed
    ///
    /// The draft is forced back to the last committed value and the error is
    /// kept for display.
    pub fn commit_failed(&mut self, message: impl Into<String>) {
        if self.state != EditState::Committing {
            return;
        }
        let message = message.into();
        warn!(key = %self.key, error = %message, "commit failed, reverting draft");

        self.pending = None;
        self.draft = self.committed.clone();
        self.caret.reset();
        self.state = EditState::Editing;
        self.last_error = Some(message);
    }

    /// Adopt a refreshed upstream value
    ///
    /// Only applies while Idle; an active edit keeps its own baseline.
    pub fn refresh_committed(&mut self, value: impl Into<String>) -> bool {
        if self.state != EditState::Idle {
            return false;
        }
        self.committed = value.into();
        self.draft = self.committed.clone();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditSession {
        EditSession::new(RecordScope::new("proj-1", "fr").unwrap(), "button.save", "Save")
    }

    #[test]
    fn test_focus_starts_editing_from_committed() {
        let mut s = session();
        assert_eq!(s.state(), EditState::Idle);
        s.focus();
        assert_eq!(s.state(), EditState::Editing);
        assert_eq!(s.draft(), "Save");
        assert_eq!(s.caret(), 4);
    }

    #[test]
    fn test_unchanged_blur_returns_to_idle_without_request() {
        let mut s = session();
        s.focus();
        assert!(s.blur().is_none());
        assert_eq!(s.state(), EditState::Idle);
    }

    #[test]
    fn test_retyping_same_value_is_unchanged() {
        let mut s = session();
        s.focus();
        s.input("Sav", None);
        s.input("Save", None);
        assert!(s.blur().is_none());
        assert_eq!(s.state(), EditState::Idle);
    }

    #[test]
    fn test_changed_blur_builds_request() {
        let mut s = session();
        s.focus();
        s.input("Enregistrer", Some(11));

        let request = s.blur().unwrap();
        assert_eq!(request.key, "button.save");
        assert_eq!(request.value, "Enregistrer");
        assert_eq!(request.updated_by, "proj-1");
        assert_eq!(request.scope.locale, "fr");
        assert_eq!(s.state(), EditState::Committing);
        assert!(s.is_busy());
        assert_eq!(s.display(), "Enregistrer");

        let batch = request.to_batch();
        assert_eq!(batch["button.save"].value, "Enregistrer");
        assert_eq!(batch["button.save"].updated_by, "proj-1");
    }

    #[test]
    fn test_enter_acts_as_blur() {
        let mut s = session();
        s.focus();
        s.input("Sauver", None);
        assert!(s.press_enter().is_some());
        assert_eq!(s.state(), EditState::Committing);
    }

    #[test]
    fn test_escape_discards_draft() {
        let mut s = session();
        s.focus();
        s.input("xyz", Some(3));
        s.press_escape();

        assert_eq!(s.state(), EditState::Idle);
        assert_eq!(s.display(), "Save");
        assert_eq!(s.draft(), "Save");
        assert!(s.pending().is_none());
    }

    #[test]
    fn test_success_promotes_value() {
        let mut s = session();
        s.focus();
        s.input("Enregistrer", None);
        s.blur();
        s.commit_succeeded();

        assert_eq!(s.state(), EditState::Idle);
        assert_eq!(s.committed(), "Enregistrer");
        assert_eq!(s.display(), "Enregistrer");
        assert!(s.pending().is_none());
    }

    #[test]
    fn test_failure_reverts_to_committed() {
        let mut s = session();
        s.focus();
        s.input("Enregistrer", None);
        s.blur();
        s.commit_failed("Internal Server Error");

        assert_eq!(s.state(), EditState::Editing);
        assert_eq!(s.display(), "Save");
        assert_eq!(s.committed(), "Save");
        assert_eq!(s.last_error(), Some("Internal Server Error"));

        // Nothing to retry: leaving the cell is a no-op blur
        assert!(s.blur().is_none());
        assert_eq!(s.state(), EditState::Idle);
    }

    #[test]
    fn test_no_second_commit_while_busy() {
        let mut s = session();
        s.focus();
        s.input("One", None);
        assert!(s.blur().is_some());

        s.input("Two", None);
        assert_eq!(s.draft(), "Two");
        assert!(s.blur().is_none());
        assert!(s.press_enter().is_none());
        assert_eq!(s.pending().map(|r| r.value.as_str()), Some("One"));
    }

    #[test]
    fn test_typing_during_commit_stays_editing_after_success() {
        let mut s = session();
        s.focus();
        s.input("One", None);
        s.blur();
        s.input("Two", None);
        s.commit_succeeded();

        assert_eq!(s.committed(), "One");
        assert_eq!(s.state(), EditState::Editing);
        assert_eq!(s.draft(), "Two");
        assert_eq!(s.blur().map(|r| r.value), Some("Two".to_string()));
    }

    #[test]
    fn test_escape_ignored_while_committing() {
        let mut s = session();
        s.focus();
        s.input("One", None);
        s.blur();
        s.press_escape();
        assert_eq!(s.state(), EditState::Committing);
    }

    #[test]
    fn test_completion_without_commit_is_ignored() {
        let mut s = session();
        s.commit_succeeded();
        s.commit_failed("late");
        assert_eq!(s.state(), EditState::Idle);
        assert_eq!(s.last_error(), None);
    }

    #[test]
    fn test_input_ignored_while_idle() {
        let mut s = session();
        s.input("typed", None);
        assert_eq!(s.draft(), "Save");
        assert_eq!(s.display(), "Save");
    }

    #[test]
    fn test_focus_clears_previous_error() {
        let mut s = session();
        s.focus();
        s.input("x", None);
        s.blur();
        s.commit_failed("boom");
        s.blur();
        s.focus();
        assert_eq!(s.last_error(), None);
    }

    #[test]
    fn test_caret_editing_primitives() {
        let mut s = session();
        s.focus();
        s.cursor_home();
        s.cursor_right();
        s.cursor_right();
        s.insert_char('X');
        assert_eq!(s.draft(), "SaXve");
        assert_eq!(s.caret(), 3);

        s.backspace();
        assert_eq!(s.draft(), "Save");
        assert_eq!(s.caret(), 2);

        s.delete();
        assert_eq!(s.draft(), "Sae");
        assert_eq!(s.caret(), 2);

        s.cursor_end();
        assert_eq!(s.caret(), 3);
        s.cursor_left();
        assert_eq!(s.caret(), 2);
    }

    #[test]
    fn test_caret_tracks_input_offset() {
        let mut s = session();
        s.focus();
        s.input("Sauvegarder", Some(4));
        assert_eq!(s.caret(), 4);
        s.input("Sau", Some(4));
        assert_eq!(s.caret(), 3);
    }

    #[test]
    fn test_refresh_committed_only_when_idle() {
        let mut s = session();
        assert!(s.refresh_committed("Store"));
        assert_eq!(s.display(), "Store");

        s.focus();
        assert!(!s.refresh_committed("Other"));
        assert_eq!(s.committed(), "Store");
    }
}
