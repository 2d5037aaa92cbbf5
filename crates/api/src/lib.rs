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

//! In-process API boundary.
//!
//! HTTP handlers call into this crate with decoded requests and turn the
//! outcome into a response: a `ValidationResult` is always a 200, an
//! [`ApiError`] carries its own status via [`ApiError::http_status`].

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, ErrorResponse, translate_core_error, translate_domain_error, translate_quota_error,
    translate_snapshot_error,
};
pub use handlers::{
    approve_transfer, execute_transfer, reject_transfer, simulate_transfer, suggest_for_request,
    validate_request,
};
pub use request_response::{
    DecideTransferRequest, ExecuteTransferRequest, SuggestionResponse, ValidationRequest,
    ViolationAlternatives,
};
