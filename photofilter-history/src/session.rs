//! Editing session: one history plus the bookkeeping for edits that resolve later.
//!
//! Filter and transform results arrive after a round trip. A result is only applied if the
//! session that asked for it is still the live one; navigating away resets the token, so
//! late answers are dropped instead of landing on a fresh history.

use std::collections::BTreeSet;
use std::fmt;

use photofilter_core::{EditError, ImageRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EditHistory;

/// Identifies one editing session (the generation a pending edit belongs to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(pub Uuid);

impl SessionToken {
    fn fresh() -> Self {
        SessionToken(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a resolved image enters the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushKind {
    /// Picked or captured image: a new origin.
    Upload,
    /// Filter or transform output.
    Derived,
}

/// Ticket for an edit whose result has not arrived yet. Consumed by `complete`.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending edit must be completed or it stays counted as in flight"]
pub struct PendingEdit {
    token: SessionToken,
    seq: u64,
    kind: PushKind,
}

impl PendingEdit {
    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn kind(&self) -> PushKind {
        self.kind
    }

    /// Order in which the edit was started within its session.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What happened to a completed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied(ImageRef),
    /// The session was reset while the edit was in flight.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    token: SessionToken,
    history: EditHistory,
    next_seq: u64,
    outstanding: BTreeSet<u64>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        let token = SessionToken::fresh();
        tracing::info!(session = %token, "editing session started");
        Self {
            token,
            history: EditHistory::new(),
            next_seq: 0,
            outstanding: BTreeSet::new(),
        }
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Direct access for undo/redo/restore, which never wait on anything.
    pub fn history_mut(&mut self) -> &mut EditHistory {
        &mut self.history
    }

    /// Number of edits started in this session and not yet completed.
    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    /// Start an edit. The history is not touched until `complete`.
    pub fn begin(&mut self, kind: PushKind) -> PendingEdit {
        let pending = PendingEdit {
            token: self.token,
            seq: self.next_seq,
            kind,
        };
        self.next_seq += 1;
        self.outstanding.insert(pending.seq);

        tracing::debug!(
            session = %self.token,
            seq = pending.seq,
            kind = ?kind,
            in_flight = self.outstanding.len(),
            "edit started"
        );
        pending
    }

    /// Apply (or drop) the result of an edit started with `begin`.
    ///
    /// Results are applied in the order they complete. On `Err` the history is left
    /// untouched and the error is handed back for the caller to surface.
    pub fn complete(
        &mut self,
        pending: PendingEdit,
        result: Result<ImageRef, EditError>,
    ) -> Result<EditOutcome, EditError> {
        if pending.token != self.token {
            tracing::debug!(
                stale = %pending.token,
                session = %self.token,
                seq = pending.seq,
                "discarding result for a closed session"
            );
            return Ok(EditOutcome::Discarded);
        }

        if !self.outstanding.remove(&pending.seq) {
            tracing::warn!(
                session = %self.token,
                seq = pending.seq,
                "result for an edit that is not in flight, ignoring"
            );
            return Ok(EditOutcome::Discarded);
        }

        let image = match result {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(seq = pending.seq, error = %e, "edit failed, history unchanged");
                return Err(e);
            }
        };

        match pending.kind {
            PushKind::Upload => self.history.push_new(image.clone()),
            PushKind::Derived => {
                // The image this edit was based on is gone (undone past the first upload).
                if self.history.is_empty() {
                    tracing::warn!(seq = pending.seq, "no image left to derive from");
                    return Err(EditError::NoImageSelected);
                }
                self.history.push_derived(image.clone());
            }
        }

        tracing::debug!(
            seq = pending.seq,
            len = self.history.len(),
            "edit applied"
        );
        Ok(EditOutcome::Applied(image))
    }

    /// The user left the editing screen: forget everything and invalidate pending edits.
    pub fn reset(&mut self) {
        let old = self.token;
        self.token = SessionToken::fresh();
        self.history.clear();
        self.next_seq = 0;
        self.outstanding.clear();
        tracing::info!(closed = %old, session = %self.token, "editing session reset");
    }
}
