// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bloc_planning::{CoreError, SnapshotError};
use bloc_planning_domain::DomainError;
use bloc_planning_quota::QuotaError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// A proposal that breaks business rules is not an error: it is a successful
/// response whose result carries `valid: false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The actor may not perform the action.
    #[error("Unauthorized: '{action}' requires a {required_kind} actor")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The actor kind required.
        required_kind: String,
    },
    /// The quota ledger refused the operation.
    #[error("Quota operation rejected ({code}): {message}")]
    QuotaRejected {
        /// Stable error code, e.g. `InsufficientBalance`.
        code: &'static str,
        /// A human-readable description.
        message: String,
    },
    /// The snapshot provider could not supply planning data.
    #[error("Planning data unavailable: {message}")]
    SnapshotUnavailable {
        /// What failed.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The HTTP status a handler should answer with.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } => 400,
            Self::Unauthorized { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::QuotaRejected { code, .. } => {
                if matches!(*code, "InsufficientBalance" | "InvalidTransition") {
                    409
                } else {
                    422
                }
            }
            Self::SnapshotUnavailable { .. } => 503,
            Self::Internal { .. } => 500,
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "InvalidInput",
            Self::NotFound { .. } => "NotFound",
            Self::Unauthorized { .. } => "Unauthorized",
            Self::QuotaRejected { code, .. } => *code,
            Self::SnapshotUnavailable { .. } => "SnapshotUnavailable",
            Self::Internal { .. } => "Internal",
        }
    }
}

/// The JSON body returned alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            status: err.http_status(),
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidIdentifier { kind, value } => ApiError::InvalidInput {
            field: format!("{kind}_id"),
            message: format!("'{value}' is not a valid {kind} identifier"),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::InvalidInput {
            field: String::from("window"),
            message: format!("Window ends ({end}) before it starts ({start})"),
        },
        DomainError::DateOutOfRange { date } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date {date} is outside the supported planning years"),
        },
        DomainError::DuplicateAssignmentId(id) => ApiError::InvalidInput {
            field: String::from("proposal"),
            message: format!("Assignment id '{id}' appears more than once"),
        },
        DomainError::InvalidSwap(msg) => ApiError::InvalidInput {
            field: String::from("proposal"),
            message: msg,
        },
        transition @ DomainError::InvalidTransition { .. } => ApiError::QuotaRejected {
            code: "InvalidTransition",
            message: transition.to_string(),
        },
        other => ApiError::InvalidInput {
            field: String::from("request"),
            message: other.to_string(),
        },
    }
}

/// Translates a snapshot provider failure into an API error.
#[must_use]
pub fn translate_snapshot_error(err: SnapshotError) -> ApiError {
    match err {
        SnapshotError::Unavailable(message) => ApiError::SnapshotUnavailable { message },
        SnapshotError::Inconsistent(message) => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Snapshot(snapshot_err) => translate_snapshot_error(snapshot_err),
        CoreError::InvalidCondition { text, reason } => ApiError::Internal {
            message: format!("Stored custom rule '{text}' is unusable: {reason}"),
        },
        config_err @ CoreError::InvalidConfig { .. } => ApiError::Internal {
            message: config_err.to_string(),
        },
    }
}

/// Translates a quota error into an API error.
#[must_use]
pub fn translate_quota_error(err: QuotaError) -> ApiError {
    match err {
        QuotaError::TransferNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Transfer"),
            message: format!("Transfer '{id}' does not exist"),
        },
        QuotaError::Domain(domain_err) => translate_domain_error(domain_err),
        QuotaError::AuditCapture(message) => ApiError::Internal { message },
        rejected => ApiError::QuotaRejected {
            code: rejected.code(),
            message: rejected.to_string(),
        },
    }
}
