// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for validation and quota operations.

use bloc_planning::{
    DOUBLE_BOOKING, DateRange, EngineConfig, Proposal, QUALIFICATION, REST_TIME, Snapshot,
    SnapshotProvider, Suggestion, ValidationEngine,
};
use bloc_planning_audit::{Actor, ActorKind, Cause};
use bloc_planning_domain::{ValidationResult, Violation};
use bloc_planning_quota::{QuotaLedger, TransferRequest, TransferResult, TransferSimulation};
use tracing::{info, warn};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_quota_error,
    translate_snapshot_error,
};
use crate::request_response::{
    DecideTransferRequest, ExecuteTransferRequest, SuggestionResponse, ValidationRequest,
    ViolationAlternatives,
};

/// Days loaded around the window so weekly rules see the whole ISO week.
const CONTEXT_DAYS: u32 = 7;

/// Validates a proposal via the API boundary.
///
/// This function:
/// - Checks the proposal and the window for structural errors
/// - Loads a snapshot for the staff involved through `provider`
/// - Runs the engine
///
/// Business-rule failures are part of the returned result (`valid: false`),
/// never an `Err`.
///
/// # Arguments
///
/// * `provider` - The persistence layer's read contract
/// * `engine` - The validation engine
/// * `request` - The proposal and its planning window
///
/// # Errors
///
/// Returns an error if:
/// - The proposal is malformed or dated outside the window
/// - The window is inverted
/// - The provider cannot supply planning data
pub fn validate_request<P: SnapshotProvider + ?Sized>(
    provider: &P,
    engine: &ValidationEngine,
    request: &ValidationRequest,
) -> Result<ValidationResult, ApiError> {
    let snapshot: Snapshot = load_request_snapshot(provider, engine, request)?;

    engine
        .validate(&request.proposal, &snapshot)
        .map_err(translate_core_error)
}

/// Validates a proposal and searches alternatives for its blocking
/// violations.
///
/// # Arguments
///
/// * `provider` - The persistence layer's read contract
/// * `engine` - The validation engine
/// * `request` - The proposal and its planning window
///
/// # Errors
///
/// Returns the same errors as [`validate_request`].
pub fn suggest_for_request<P: SnapshotProvider + ?Sized>(
    provider: &P,
    engine: &ValidationEngine,
    request: &ValidationRequest,
) -> Result<SuggestionResponse, ApiError> {
    let snapshot: Snapshot = load_request_snapshot(provider, engine, request)?;
    let result: ValidationResult = engine
        .validate(&request.proposal, &snapshot)
        .map_err(translate_core_error)?;

    let mut alternatives: Vec<ViolationAlternatives> = Vec::new();
    for violation in result.blocking() {
        let suggestions: Vec<Suggestion> = engine
            .suggest_alternatives(violation, &request.proposal, &snapshot)
            .map_err(translate_core_error)?;
        if suggestions.is_empty() && !is_resolvable(violation) {
            continue;
        }
        alternatives.push(ViolationAlternatives {
            violation: violation.clone(),
            suggestions,
        });
    }

    info!(
        violations = result.violations.len(),
        resolved = alternatives.len(),
        "Computed alternatives"
    );

    Ok(SuggestionResponse {
        result,
        alternatives,
    })
}

/// Prices a quota transfer without touching the ledger.
///
/// # Errors
///
/// Returns an error if a staff actor targets someone else's quota, or the
/// error executing the transfer would produce.
pub fn simulate_transfer(
    ledger: &QuotaLedger,
    request: &TransferRequest,
    actor: &Actor,
) -> Result<TransferSimulation, ApiError> {
    authorize_owner(actor, request, "simulate_transfer")?;
    ledger
        .simulate_transfer(request)
        .map_err(translate_quota_error)
}

/// Executes a quota transfer via the API boundary with authorization.
///
/// This function:
/// - Verifies the actor may move this staff member's quota
/// - Executes the transfer, which either applies fully or not at all
/// - Returns the resulting balances
///
/// # Arguments
///
/// * `ledger` - The quota ledger
/// * `request` - The transfer and its originating request id
/// * `actor` - The actor performing this action
///
/// # Errors
///
/// Returns an error if:
/// - A staff actor targets someone else's quota
/// - The ledger rejects the transfer (`InsufficientBalance`,
///   `NoActiveRule`, ...)
pub fn execute_transfer(
    ledger: &mut QuotaLedger,
    request: &ExecuteTransferRequest,
    actor: Actor,
) -> Result<TransferResult, ApiError> {
    authorize_owner(&actor, &request.transfer, "execute_transfer")?;

    let cause: Cause = Cause::new(
        request
            .request_id
            .clone()
            .unwrap_or_else(|| String::from("api-request")),
        String::from("Quota transfer request"),
    );

    ledger
        .execute_transfer(&request.transfer, actor, cause)
        .map_err(translate_quota_error)
}

/// Approves a pending transfer. Planners and the system only.
///
/// # Errors
///
/// Returns an error if the actor is a staff member, the transfer does not
/// exist or is already decided, or the balance no longer covers it.
pub fn approve_transfer(
    ledger: &mut QuotaLedger,
    request: &DecideTransferRequest,
    actor: Actor,
) -> Result<TransferResult, ApiError> {
    authorize_decision(&actor, "approve_transfer")?;
    ledger
        .approve_transfer(&request.transfer_id, actor, decision_cause(request, "Approved"))
        .map_err(translate_quota_error)
}

/// Rejects a pending transfer. Planners and the system only.
///
/// # Errors
///
/// Returns an error if the actor is a staff member, or the transfer does not
/// exist or is already decided.
pub fn reject_transfer(
    ledger: &mut QuotaLedger,
    request: &DecideTransferRequest,
    actor: Actor,
) -> Result<TransferResult, ApiError> {
    authorize_decision(&actor, "reject_transfer")?;
    ledger
        .reject_transfer(&request.transfer_id, actor, decision_cause(request, "Rejected"))
        .map_err(translate_quota_error)
}

fn load_request_snapshot<P: SnapshotProvider + ?Sized>(
    provider: &P,
    engine: &ValidationEngine,
    request: &ValidationRequest,
) -> Result<Snapshot, ApiError> {
    let proposal: &Proposal = &request.proposal;
    proposal.validate().map_err(translate_domain_error)?;

    let window: DateRange =
        DateRange::new(request.window_start, request.window_end).map_err(translate_domain_error)?;
    if let Some((first, last)) = proposal.date_span() {
        for date in [first, last] {
            if !window.contains(date) {
                return Err(ApiError::InvalidInput {
                    field: String::from("proposal"),
                    message: format!(
                        "Assignment dated {date} is outside the window {} to {}",
                        window.start, window.end
                    ),
                });
            }
        }
    }

    // The resolver tries dates around the proposal, so load those too
    let config: &EngineConfig = engine.config();
    let range: DateRange = window
        .widened(
            CONTEXT_DAYS
                .max(config.lookaround_days())
                .saturating_add(config.resolver.search_radius_days),
        )
        .whole_months();
    Snapshot::load(provider, &proposal.staff_ids(), range).map_err(|err| {
        warn!(error = %err, "Snapshot provider failed");
        translate_snapshot_error(err)
    })
}

fn is_resolvable(violation: &Violation) -> bool {
    [DOUBLE_BOOKING, QUALIFICATION, REST_TIME].contains(&violation.rule_id.as_str())
}

// Staff members may only convert their own days
fn authorize_owner(actor: &Actor, request: &TransferRequest, action: &str) -> Result<(), ApiError> {
    if actor.kind == ActorKind::Staff && actor.id != request.staff_id.value() {
        return Err(ApiError::Unauthorized {
            action: action.to_string(),
            required_kind: String::from("PLANNER"),
        });
    }
    Ok(())
}

fn authorize_decision(actor: &Actor, action: &str) -> Result<(), ApiError> {
    if actor.kind == ActorKind::Staff {
        return Err(ApiError::Unauthorized {
            action: action.to_string(),
            required_kind: String::from("PLANNER"),
        });
    }
    Ok(())
}

fn decision_cause(request: &DecideTransferRequest, verdict: &str) -> Cause {
    Cause::new(
        format!("decision-{}", request.transfer_id),
        request
            .reason
            .clone()
            .unwrap_or_else(|| format!("{verdict} by planner")),
    )
}
