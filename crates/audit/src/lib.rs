// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Audit trail types.
//!
//! Every successful mutation of a quota ledger produces exactly one
//! [`AuditEvent`] carrying the state before and after the change. Failed
//! mutations record nothing.

use bloc_planning_domain::StaffId;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Kind of entity initiating a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorKind {
    /// A staff member acting on their own behalf.
    Staff,
    /// A planner or manager acting on someone else's behalf.
    Planner,
    /// An automated process (carry-over, imports).
    System,
}

impl ActorKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "STAFF",
            Self::Planner => "PLANNER",
            Self::System => "SYSTEM",
        }
    }
}

/// Represents the entity performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// What kind of actor this is.
    pub kind: ActorKind,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `kind` - The kind of actor
    #[must_use]
    pub const fn new(id: String, kind: ActorKind) -> Self {
        Self { id, kind }
    }

    /// A staff member acting for themselves.
    #[must_use]
    pub fn staff(staff_id: &StaffId) -> Self {
        Self::new(staff_id.value().to_string(), ActorKind::Staff)
    }

    /// The automated system actor.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), ActorKind::System)
    }
}

/// Why a change was initiated (request id, approval reference).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause.
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`ExecuteTransfer`").
    pub name: String,
    /// Optional additional details about the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A JSON capture of the state touched by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct StateSnapshot {
    /// The captured state.
    pub data: serde_json::Value,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot` from an already built value.
    #[must_use]
    pub const fn new(data: serde_json::Value) -> Self {
        Self { data }
    }

    /// Captures any serializable state.
    ///
    /// # Errors
    ///
    /// Returns an error if `state` cannot be represented as JSON.
    pub fn capture<T: Serialize>(state: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::to_value(state)?))
    }
}

/// An immutable audit event representing one state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// Position in the log, starting at 1.
    pub sequence: u64,
    /// The entity the change applies to, e.g. a transfer id.
    pub subject: String,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

/// Append-only sequence of audit events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuditLog {
    events: Vec<AuditEvent>,
}

impl AuditLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event, assigning it the next sequence number.
    ///
    /// # Returns
    ///
    /// The sequence number assigned.
    pub fn record(
        &mut self,
        subject: &str,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> u64 {
        let sequence: u64 = self.events.last().map_or(1, |last| last.sequence + 1);
        self.events.push(AuditEvent {
            sequence,
            subject: subject.to_string(),
            actor,
            cause,
            action,
            before,
            after,
        });
        sequence
    }

    /// All events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    /// Events recorded for one subject, oldest first.
    pub fn for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a AuditEvent> {
        self.events.iter().filter(move |e| e.subject == subject)
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
