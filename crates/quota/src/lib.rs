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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Leave quota balances and conversion between leave types.
//!
//! A [`QuotaLedger`] owns balances, [`TransferRule`]s and the transfer
//! history. Transfers are all-or-nothing and every accepted one is written
//! to the ledger's audit log.

mod balance;
mod error;
mod ledger;
mod rule;

#[cfg(test)]
mod tests;

pub use balance::QuotaBalance;
pub use error::{QUOTA_TRANSFER, QuotaError};
pub use ledger::{
    CarryOverSimulation, QuotaLedger, QuotaTransfer, TransferRequest, TransferResult,
    TransferSimulation,
};
pub use rule::{CarryOverKind, CarryOverRule, TransferRule};
