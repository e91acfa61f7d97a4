use crate::{harvest::write_as_beancount, ledger::Ledger, statement::Statement};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use dividend_allocation::{defaults::*, PositionQuery, Settings};
use rust_decimal::Decimal;
use std::path::PathBuf;
use time::{macros::format_description, Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Post dividends from a statement, split across the accounts holding each asset
    Harvest {
        /// Beancount file path
        beanpath: PathBuf,

        /// Statement of dividend accruals as JSON
        statement: PathBuf,

        /// Post accruals paid up to this date, defaults to today
        #[clap(long, value_parser = parse_date)]
        today: Option<Date>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Show the quantity of an asset held per account before a date
    Positions {
        /// Beancount file path
        beanpath: PathBuf,

        /// Commodity as used in the ledger
        asset: String,

        /// Only entries strictly before this date are counted
        #[clap(value_parser = parse_date)]
        before: Date,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// Currency the books are kept in
    #[clap(long, default_value_t = default_base_currency().to_string())]
    base_currency: String,

    /// Price in base currency attached to income in any other currency
    #[clap(long, default_value_t = default_display_price())]
    display_price: Decimal,

    /// Final segment of the receivable account for withheld tax
    #[clap(long, default_value_t = default_withholding_label().to_string())]
    withholding_label: String,

    /// Suffix stripped from feed symbols to give the ledger commodity
    #[clap(long, default_value_t = default_symbol_suffix())]
    symbol_suffix: char,
}

impl From<SettingsArgs> for Settings {
    fn from(value: SettingsArgs) -> Self {
        Settings {
            base_currency: value.base_currency,
            display_price: value.display_price,
            withholding_label: value.withholding_label,
            symbol_suffix: value.symbol_suffix,
        }
    }
}

fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
}

fn local_today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let out_w = &std::io::stdout();
    let error_w = &std::io::stderr();

    // stdout is reserved for the generated ledger entries
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Command::Harvest {
            beanpath: ledger,
            statement,
            today,
            settings,
        } => {
            let ledger = Ledger::load_from(&ledger, error_w)?;
            let statement = Statement::read_from(&statement)?;
            let transactions = harvest::harvest(
                &ledger,
                &statement,
                settings.into(),
                today.unwrap_or_else(local_today),
            )?;
            write_as_beancount(&transactions, out_w)
        }

        Command::Positions {
            beanpath: ledger,
            asset,
            before,
        } => {
            use std::io::Write;

            let ledger = Ledger::load_from(&ledger, error_w)?;
            let mut out_w = out_w.lock();
            for row in ledger.positions(&asset, before)? {
                writeln!(out_w, "{} {} {}", &row.account, row.quantity, &asset)?;
            }
            Ok(())
        }
    }
}

pub(crate) mod harvest;
pub(crate) mod ledger;
pub(crate) mod statement;
