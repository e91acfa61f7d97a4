use color_eyre::eyre::Result;
use dividend_allocation::{Engine, Settings, Transaction};
use std::io::{BufWriter, Write};
use time::Date;

use crate::{ledger::Ledger, statement::Statement};

/// Dividend transactions for everything in the statement paid by `today` and not yet in the ledger.
pub(crate) fn harvest(
    ledger: &Ledger,
    statement: &Statement,
    settings: Settings,
    today: Date,
) -> Result<Vec<Transaction>> {
    let engine = Engine::new(ledger, settings).with_posted(ledger.txnids().map(str::to_string));
    let transactions = engine.harvest(&statement.accruals, today)?;

    tracing::info!(
        "harvested {} transactions from {} accruals",
        transactions.len(),
        statement.accruals.len()
    );

    Ok(transactions)
}

pub(crate) fn write_as_beancount<W>(transactions: &[Transaction], out_w: W) -> Result<()>
where
    W: Write + Copy,
{
    let mut buffered_out_w = BufWriter::new(out_w);
    for transaction in transactions {
        writeln!(buffered_out_w, "{transaction}")?;
    }
    buffered_out_w.flush()?;

    Ok(())
}
