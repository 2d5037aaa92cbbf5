// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloc_planning_domain::DomainError;

/// Errors raised by a snapshot provider.
///
/// These are infrastructure failures and are never reported as rule
/// violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The backing store could not be reached.
    Unavailable(String),
    /// The store returned data that cannot be used.
    Inconsistent(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Snapshot unavailable: {msg}"),
            Self::Inconsistent(msg) => write!(f, "Inconsistent snapshot: {msg}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Errors that can occur while validating a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A structural precondition on the input was violated.
    DomainViolation(DomainError),
    /// The snapshot provider failed.
    Snapshot(SnapshotError),
    /// A custom rule condition could not be parsed.
    InvalidCondition {
        /// The rejected condition text.
        text: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A configuration value is outside its usable range.
    InvalidConfig {
        /// The offending setting, e.g. `rest_time.minimum_rest_hours`.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::InvalidCondition { text, reason } => {
                write!(f, "Invalid rule condition '{text}': {reason}")
            }
            Self::InvalidConfig { field, reason } => {
                write!(f, "Invalid configuration for {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DomainViolation(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::InvalidCondition { .. } | Self::InvalidConfig { .. } => None,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<SnapshotError> for CoreError {
    fn from(err: SnapshotError) -> Self {
        Self::Snapshot(err)
    }
}
