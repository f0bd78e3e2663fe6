//! Invoices CLI
//!
//! Command-line driver for the invoice aggregation engine. Every command
//! works against a fresh in-memory store: rates come from `--rate` (or
//! `INVOICE_EXCHANGE_RATES`), transactions from a JSON file.

mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, LogFormat};
use invoice_repo::{InMemoryRepo, build_repo};
use invoice_service::InvoiceService;
use invoice_types::{
    AppError, CalculateRequest, Currency, DomainError, ErrorClass, ExchangeRate, Money,
    Transaction,
};

#[derive(Parser)]
#[command(name = "invoices")]
#[command(author, version, about = "Multi-currency invoice aggregation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RateArgs {
    /// Exchange rate as CODE:RATE; exactly one must equal 1
    #[arg(
        long = "rate",
        env = "INVOICE_EXCHANGE_RATES",
        value_delimiter = ',',
        required = true
    )]
    rates: Vec<ExchangeRate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sum customer balances from a transactions file
    Sum {
        /// JSON file holding an array of transactions
        #[arg(long)]
        transactions: PathBuf,
        /// Currency balances are reported in (defaults to INVOICE_OUTPUT_CURRENCY)
        #[arg(long)]
        output_currency: Option<Currency>,
        /// Only report the customer with this tax id
        #[arg(long)]
        tax_id: Option<String>,
        #[command(flatten)]
        rates: RateArgs,
    },
    /// Convert an amount between two currencies
    Convert {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        from: Currency,
        #[arg(long)]
        to: Currency,
        #[command(flatten)]
        rates: RateArgs,
    },
    /// Print the base currency inferred from the rates
    BaseRate {
        #[command(flatten)]
        rates: RateArgs,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,invoice_service=debug,invoice_cli=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable JSON.
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn read_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    // A malformed file is bad input, not an internal failure.
    serde_json::from_str(&raw).map_err(|err| {
        let reason = format!("failed to parse {}: {err}", path.display());
        AppError::from(DomainError::ValidationError(reason)).into()
    })
}

fn exit_code(class: ErrorClass) -> u8 {
    match class {
        ErrorClass::BadRequest => 2,
        ErrorClass::NotFound => 3,
        ErrorClass::Internal => 1,
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let service: InvoiceService<InMemoryRepo> = InvoiceService::new(build_repo());

    match cli.command {
        Commands::Sum {
            transactions,
            output_currency,
            tax_id,
            rates,
        } => {
            let transactions = read_transactions(&transactions)?;
            let request = CalculateRequest {
                output_currency: output_currency.unwrap_or(config.output_currency),
                exchange_rates: rates.rates,
                transactions,
                customer_vat: tax_id,
            };
            let response = service.calculate(request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Convert {
            amount,
            from,
            to,
            rates,
        } => {
            service.import_rates(rates.rates).await?;
            let converted = service.convert_to(&Money::new(amount, from), &to).await?;
            println!("{}", serde_json::to_string_pretty(&converted)?);
        }

        Commands::BaseRate { rates } => {
            let base = service.import_rates(rates.rates).await?;
            println!("{}", serde_json::to_string_pretty(&base)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            let body = serde_json::json!({ "error": format!("{err:#}"), "code": "internal" });
            eprintln!("{body}");
            return ExitCode::from(1);
        }
    };
    init_tracing(config.log_format);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let class = err
                .downcast_ref::<AppError>()
                .map(AppError::class)
                .unwrap_or(ErrorClass::Internal);
            tracing::debug!(error = %err, code = class.as_str(), "command failed");
            let body = serde_json::json!({ "error": format!("{err:#}"), "code": class.as_str() });
            eprintln!("{body}");
            ExitCode::from(exit_code(class))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_sum_command() {
        let cli = Cli::try_parse_from([
            "invoices",
            "sum",
            "--transactions",
            "ledger.json",
            "--rate",
            "EUR:1",
            "--rate",
            "USD:0.987,GBP:0.878",
            "--output-currency",
            "gbp",
            "--tax-id",
            "123456789",
        ])
        .unwrap();

        let Commands::Sum {
            output_currency,
            tax_id,
            rates,
            ..
        } = cli.command
        else {
            panic!("expected sum command");
        };
        assert_eq!(output_currency.unwrap().code(), "GBP");
        assert_eq!(tax_id.as_deref(), Some("123456789"));
        let codes: Vec<_> = rates.rates.iter().map(|r| r.currency.code()).collect();
        assert_eq!(codes, ["EUR", "USD", "GBP"]);
    }

    #[test]
    fn test_rejects_malformed_rate() {
        let result = Cli::try_parse_from(["invoices", "base-rate", "--rate", "EUR=1"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_exit_codes_by_class() {
        assert_eq!(exit_code(ErrorClass::BadRequest), 2);
        assert_eq!(exit_code(ErrorClass::NotFound), 3);
        assert_eq!(exit_code(ErrorClass::Internal), 1);
    }

    #[tokio::test]
    async fn test_sum_reports_missing_file() {
        let cli = Cli::try_parse_from([
            "invoices",
            "sum",
            "--transactions",
            "/nonexistent/ledger.json",
            "--rate",
            "EUR:1",
        ])
        .unwrap();
        let config = Config {
            log_format: LogFormat::Pretty,
            output_currency: "EUR".parse().unwrap(),
        };

        let err = run(cli, config).await.unwrap_err();

        assert!(err.downcast_ref::<AppError>().is_none());
        assert!(format!("{err:#}").contains("failed to read"));
    }

    #[tokio::test]
    async fn test_sum_classifies_malformed_file_as_bad_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "customer": "Vendor 1", "tax_id": "123456789", "document_id": "1",
                 "transaction_type": "REFUND", "total": {{ "amount": "1", "currency": "USD" }} }}]"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::try_parse_from([
            "invoices",
            "sum",
            "--transactions",
            path.as_str(),
            "--rate",
            "USD:1",
        ])
        .unwrap();
        let config = Config {
            log_format: LogFormat::Pretty,
            output_currency: "USD".parse().unwrap(),
        };

        let err = run(cli, config).await.unwrap_err();

        let class = err.downcast_ref::<AppError>().map(AppError::class);
        assert_eq!(class, Some(ErrorClass::BadRequest));
        assert_eq!(exit_code(ErrorClass::BadRequest), 2);
    }

    #[tokio::test]
    async fn test_base_rate_error_is_classified() {
        let cli =
            Cli::try_parse_from(["invoices", "base-rate", "--rate", "EUR:2", "--rate", "USD:3"])
                .unwrap();
        let config = Config {
            log_format: LogFormat::Pretty,
            output_currency: "EUR".parse().unwrap(),
        };

        let err = run(cli, config).await.unwrap_err();

        let class = err.downcast_ref::<AppError>().map(AppError::class);
        assert_eq!(class, Some(ErrorClass::BadRequest));
    }
}
