// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use bloc_planning::{Proposal, Suggestion};
use bloc_planning_domain::{ValidationResult, Violation};
use bloc_planning_quota::TransferRequest;
use serde::{Deserialize, Serialize};
use time::Date;

/// API request to validate a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    /// A single assignment, a batch, a removal or a swap.
    pub proposal: Proposal,
    /// First day of the planning window being edited.
    pub window_start: Date,
    /// Last day of the planning window being edited (inclusive).
    pub window_end: Date,
}

/// Alternatives found for one blocking violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationAlternatives {
    /// The violation being resolved.
    pub violation: Violation,
    /// Ranked alternatives, best first. Empty when nothing fits.
    pub suggestions: Vec<Suggestion>,
}

/// API response for a validation with alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    /// The validation result, unmodified.
    pub result: ValidationResult,
    /// One entry per eligible blocking violation, in result order.
    pub alternatives: Vec<ViolationAlternatives>,
}

/// API request to execute a quota transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTransferRequest {
    /// The transfer itself.
    #[serde(flatten)]
    pub transfer: TransferRequest,
    /// Reference of the originating request, recorded as the audit cause.
    #[serde(default)]
    pub request_id: Option<String>,
}

/// API request to approve or reject a pending transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideTransferRequest {
    /// The pending transfer.
    pub transfer_id: String,
    /// Why the decision was taken.
    #[serde(default)]
    pub reason: Option<String>,
}
