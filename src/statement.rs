use color_eyre::eyre::{Result, WrapErr};
use dividend_allocation::AccrualRecord;
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

/// Dividend accruals from a broker statement, as already parsed from the feed.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Statement {
    #[serde(alias = "changeInDividendAccruals")]
    pub(crate) accruals: Vec<AccrualRecord>,
}

impl Statement {
    pub(crate) fn read_from(path: &Path) -> Result<Self> {
        let statement_file =
            File::open(path).wrap_err_with(|| format!("failed to read {path:?}"))?;

        serde_json::from_reader(BufReader::new(statement_file))
            .wrap_err_with(|| format!("failed to deserialize statement in {path:?}"))
    }
}

#[cfg(test)]
mod tests;
