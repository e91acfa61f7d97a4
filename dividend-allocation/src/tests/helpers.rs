use rust_decimal::Decimal;
use time::Date;
use tracing_subscriber::EnvFilter;

use crate::{AccrualCode, AccrualRecord, HarvestError, PositionQuery, PositionRow, Transaction};

pub(crate) fn accrual(
    symbol: &str,
    currency: &str,
    dates: (Date, Date),
    quantity: Decimal,
    net_amount: Decimal,
    tax: Decimal,
) -> AccrualRecord {
    let (ex_date, pay_date) = dates;

    AccrualRecord {
        code: AccrualCode::Posted,
        symbol: symbol.to_string(),
        currency: currency.to_string(),
        ex_date,
        pay_date,
        quantity,
        net_amount,
        tax,
        gross_amount: None,
        fee: None,
        fx_rate_to_base: None,
    }
}

pub(crate) fn rows(rows: &[(&str, Decimal)]) -> Vec<PositionRow> {
    rows.iter()
        .map(|(account, quantity)| (*account, *quantity).into())
        .collect()
}

/// Ledger postings as date, account, currency, units, grouped in order of first appearance.
#[derive(Default, Debug)]
pub(crate) struct Postings(pub(crate) Vec<(Date, &'static str, &'static str, Decimal)>);

impl PositionQuery for Postings {
    fn positions(&self, asset: &str, before: Date) -> Result<Vec<PositionRow>, HarvestError> {
        let mut rows = Vec::<PositionRow>::default();

        for (date, account, currency, units) in &self.0 {
            if *currency == asset && *date < before {
                if let Some(row) = rows.iter_mut().find(|row| row.account == *account) {
                    row.quantity += *units;
                } else {
                    rows.push((*account, *units).into());
                }
            }
        }

        Ok(rows)
    }
}

#[derive(Debug)]
pub(crate) struct Unavailable;

impl PositionQuery for Unavailable {
    fn positions(&self, _asset: &str, _before: Date) -> Result<Vec<PositionRow>, HarvestError> {
        Err(HarvestError::Query("ledger unavailable".to_string()))
    }
}

pub(crate) fn assert_balanced(transaction: &Transaction) {
    assert!(
        transaction.is_balanced(),
        "unbalanced transaction\n{transaction}"
    );
}

pub(crate) fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber).unwrap();
    });
}
