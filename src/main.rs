//! `bankwire` command-line client.
//!
//! Runs one operation against the configured core and prints the classified
//! outcome as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use bankwire::config::load_config;
use bankwire::observability::init_logging;
use bankwire::operations::{
    AccountCreationOp, AccountCreationParams, CardReplacementOp, CardReplacementParams, CustomerLimitOp,
    CustomerLimitParams, ExchangeRateOp, ExchangeRateParams, FraudCheckOp, FraudCheckParams, MiniStatementOp,
    MiniStatementParams, ReplacementReason,
};
use bankwire::{BankResult, CoreBankClient, Operation, Outcome};

#[derive(Parser)]
#[command(name = "bankwire")]
#[command(about = "Call core-banking operations from the command line", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "bankwire.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a replacement debit card
    ReplaceCard(ReplaceCardArgs),
    /// Look up an exchange rate
    ExchangeRate(ExchangeRateArgs),
    /// Fetch the latest postings on an account
    MiniStatement(MiniStatementArgs),
    /// Open an account for an existing customer
    CreateAccount(CreateAccountArgs),
    /// Amend a customer transaction limit
    AmendLimit(AmendLimitArgs),
    /// Screen a transaction for fraud
    FraudCheck(FraudCheckArgs),
}

#[derive(Args)]
struct ReplaceCardArgs {
    #[arg(long)]
    account: String,
    #[arg(long)]
    card: String,
    /// lost, stolen, damaged or expired
    #[arg(long, default_value = "lost", value_parser = parse_reason)]
    reason: ReplacementReason,
    #[arg(long)]
    branch: Option<String>,
}

#[derive(Args)]
struct ExchangeRateArgs {
    #[arg(long)]
    from: String,
    #[arg(long)]
    to: String,
    #[arg(long)]
    rate_type: Option<String>,
}

#[derive(Args)]
struct MiniStatementArgs {
    #[arg(long)]
    account: String,
    #[arg(long, default_value_t = 10)]
    count: u32,
}

#[derive(Args)]
struct CreateAccountArgs {
    #[arg(long)]
    customer: String,
    #[arg(long)]
    product: String,
    #[arg(long)]
    currency: String,
    #[arg(long)]
    branch: String,
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args)]
struct AmendLimitArgs {
    #[arg(long)]
    customer: String,
    #[arg(long)]
    limit_type: String,
    #[arg(long)]
    amount: String,
    #[arg(long)]
    currency: String,
    #[arg(long)]
    effective_date: Option<String>,
}

#[derive(Args)]
struct FraudCheckArgs {
    #[arg(long)]
    reference: String,
    #[arg(long)]
    account: String,
    #[arg(long)]
    amount: String,
    #[arg(long)]
    currency: String,
    #[arg(long, default_value = "API")]
    channel: String,
    #[arg(long)]
    beneficiary: Option<String>,
}

fn parse_reason(value: &str) -> Result<ReplacementReason, String> {
    match value.to_ascii_lowercase().as_str() {
        "lost" => Ok(ReplacementReason::Lost),
        "stolen" => Ok(ReplacementReason::Stolen),
        "damaged" => Ok(ReplacementReason::Damaged),
        "expired" => Ok(ReplacementReason::Expired),
        other => Err(format!("unknown replacement reason '{other}'")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether the operation reported business success.
async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = load_config(&cli.config)?;
    init_logging(&config.observability);

    tracing::info!(config = %cli.config.display(), "bankwire v{} starting", env!("CARGO_PKG_VERSION"));

    let client = CoreBankClient::from_config(&config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling call");
            on_interrupt.cancel();
        }
    });

    match cli.command {
        Commands::ReplaceCard(args) => {
            let params = CardReplacementParams {
                account_number: args.account,
                card_number: args.card,
                reason: args.reason,
                collection_branch: args.branch,
            };
            execute::<CardReplacementOp>(&client, &params, &cancel).await
        }
        Commands::ExchangeRate(args) => {
            let params = ExchangeRateParams {
                from_currency: args.from,
                to_currency: args.to,
                rate_type: args.rate_type,
            };
            execute::<ExchangeRateOp>(&client, &params, &cancel).await
        }
        Commands::MiniStatement(args) => {
            let params = MiniStatementParams {
                account_number: args.account,
                count: args.count,
            };
            execute::<MiniStatementOp>(&client, &params, &cancel).await
        }
        Commands::CreateAccount(args) => {
            let params = AccountCreationParams {
                customer_id: args.customer,
                product_code: args.product,
                currency: args.currency,
                branch_code: args.branch,
                account_title: args.title,
            };
            execute::<AccountCreationOp>(&client, &params, &cancel).await
        }
        Commands::AmendLimit(args) => {
            let params = CustomerLimitParams {
                customer_id: args.customer,
                limit_type: args.limit_type,
                amount: args.amount,
                currency: args.currency,
                effective_date: args.effective_date,
            };
            execute::<CustomerLimitOp>(&client, &params, &cancel).await
        }
        Commands::FraudCheck(args) => {
            let params = FraudCheckParams {
                transaction_reference: args.reference,
                account_number: args.account,
                amount: args.amount,
                currency: args.currency,
                channel: args.channel,
                beneficiary_account: args.beneficiary,
            };
            execute::<FraudCheckOp>(&client, &params, &cancel).await
        }
    }
}

async fn execute<O>(
    client: &CoreBankClient,
    params: &O::Params,
    cancel: &CancellationToken,
) -> Result<bool, Box<dyn std::error::Error>>
where
    O: Operation,
    O::Detail: Serialize,
{
    let outcome: BankResult<Outcome<O::Detail>> = client.call_with_cancel::<O>(params, cancel).await;
    let outcome = outcome?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(outcome.success())
}
