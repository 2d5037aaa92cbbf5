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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

//! Operator front end: validates proposals against a snapshot file and runs
//! quota transfers against a ledger file.

mod files;

use std::path::PathBuf;

use bloc_planning::{EngineConfig, Snapshot, ValidationEngine};
use bloc_planning_api::{
    ApiError, DecideTransferRequest, ErrorResponse, ExecuteTransferRequest, SuggestionResponse,
    ValidationRequest, approve_transfer, execute_transfer, reject_transfer, suggest_for_request,
    validate_request,
};
use bloc_planning_audit::{Actor, ActorKind};
use bloc_planning_domain::ValidationResult;
use bloc_planning_quota::{QuotaLedger, TransferResult};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    // RUST_LOG refines the level picked by -v/-q
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(args.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Operating-room planning validation and quota transfers.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a proposal and print the result
    #[command(visible_alias = "v")]
    Validate(PlanningArgs),

    /// Validate a proposal and print alternatives for blocking violations
    #[command(visible_alias = "s")]
    Suggest(PlanningArgs),

    /// Execute a quota transfer against a ledger file
    #[command(visible_alias = "t")]
    Transfer(TransferArgs),

    /// Approve a pending quota transfer
    Approve(DecideArgs),

    /// Reject a pending quota transfer
    Reject(DecideArgs),
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::Validate(args) => args.validate(),
            Self::Suggest(args) => args.suggest(),
            Self::Transfer(args) => args.transfer(),
            Self::Approve(args) => args.decide(Decision::Approve),
            Self::Reject(args) => args.decide(Decision::Reject),
        }
    }
}

#[derive(Debug, ClapArgs)]
struct PlanningArgs {
    /// Snapshot JSON file (assignments, leaves, staff, resources, sectors)
    #[arg(long)]
    snapshot: PathBuf,

    /// Validation request JSON file
    #[arg(long)]
    request: PathBuf,

    /// Engine configuration JSON file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

impl PlanningArgs {
    fn load(&self) -> Result<(Snapshot, ValidationEngine, ValidationRequest)> {
        let snapshot: Snapshot = files::read_json(&self.snapshot)?;
        let config: EngineConfig = match &self.config {
            Some(path) => files::read_json(path)?,
            None => EngineConfig::default(),
        };
        config.validate().wrap_err("Invalid engine configuration")?;
        let request: ValidationRequest = files::read_json(&self.request)?;
        Ok((snapshot, ValidationEngine::standard(config), request))
    }

    fn validate(&self) -> Result<()> {
        let (snapshot, engine, request) = self.load()?;
        let result: ValidationResult =
            validate_request(&snapshot, &engine, &request).map_err(report)?;

        info!(valid = result.valid, violations = result.violations.len(), "Validation done");
        files::print_json(&result)
    }

    fn suggest(&self) -> Result<()> {
        let (snapshot, engine, request) = self.load()?;
        let response: SuggestionResponse =
            suggest_for_request(&snapshot, &engine, &request).map_err(report)?;

        files::print_json(&response)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActorArg {
    Staff,
    Planner,
    System,
}

impl From<ActorArg> for ActorKind {
    fn from(arg: ActorArg) -> Self {
        match arg {
            ActorArg::Staff => Self::Staff,
            ActorArg::Planner => Self::Planner,
            ActorArg::System => Self::System,
        }
    }
}

#[derive(Debug, ClapArgs)]
struct TransferArgs {
    /// Quota ledger JSON file
    #[arg(long)]
    ledger: PathBuf,

    /// Transfer request JSON file
    #[arg(long)]
    request: PathBuf,

    /// Who performs the transfer
    #[arg(long, default_value = "cli")]
    actor: String,

    /// Kind of actor performing the transfer
    #[arg(long, value_enum, default_value_t = ActorArg::Planner)]
    actor_kind: ActorArg,

    /// Write the updated ledger back to the ledger file
    #[arg(long)]
    write: bool,
}

impl TransferArgs {
    fn transfer(&self) -> Result<()> {
        let mut ledger: QuotaLedger = files::read_json(&self.ledger)?;
        let request: ExecuteTransferRequest = files::read_json(&self.request)?;
        let actor: Actor = Actor::new(self.actor.clone(), self.actor_kind.into());

        let result: TransferResult =
            execute_transfer(&mut ledger, &request, actor).map_err(report)?;

        if self.write {
            files::write_json(&self.ledger, &ledger)?;
            info!(path = %self.ledger.display(), "Ledger updated");
        }
        files::print_json(&result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Approve,
    Reject,
}

#[derive(Debug, ClapArgs)]
struct DecideArgs {
    /// Quota ledger JSON file
    #[arg(long)]
    ledger: PathBuf,

    /// Id of the pending transfer
    #[arg(long)]
    transfer_id: String,

    /// Why the decision was taken
    #[arg(long)]
    reason: Option<String>,

    /// Who takes the decision
    #[arg(long, default_value = "cli")]
    actor: String,

    /// Kind of actor taking the decision
    #[arg(long, value_enum, default_value_t = ActorArg::Planner)]
    actor_kind: ActorArg,

    /// Write the updated ledger back to the ledger file
    #[arg(long)]
    write: bool,
}

impl DecideArgs {
    fn decide(&self, decision: Decision) -> Result<()> {
        let mut ledger: QuotaLedger = files::read_json(&self.ledger)?;
        let request: DecideTransferRequest = DecideTransferRequest {
            transfer_id: self.transfer_id.clone(),
            reason: self.reason.clone(),
        };
        let actor: Actor = Actor::new(self.actor.clone(), self.actor_kind.into());

        let result: TransferResult = match decision {
            Decision::Approve => approve_transfer(&mut ledger, &request, actor),
            Decision::Reject => reject_transfer(&mut ledger, &request, actor),
        }
        .map_err(report)?;

        if self.write {
            files::write_json(&self.ledger, &ledger)?;
            info!(
                path = %self.ledger.display(),
                transfer_id = %self.transfer_id,
                "Ledger updated"
            );
        }
        files::print_json(&result)
    }
}

/// Prints the error body a handler would return, then fails the command.
fn report(err: ApiError) -> color_eyre::Report {
    let body: ErrorResponse = ErrorResponse::from(&err);
    match serde_json::to_string_pretty(&body) {
        Ok(json) => println!("{json}"),
        Err(encode_err) => error!("Failed to encode error body: {encode_err}"),
    }
    color_eyre::Report::new(err).wrap_err(format!("Request failed with status {}", body.status))
}
