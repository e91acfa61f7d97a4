use rust_decimal::Decimal;
use std::collections::HashSet;
use time::Date;

use crate::{
    allocate, defaults::*, eligible, transaction::DividendContext, AccrualRecord,
    DerivedAccounts, HarvestError, PositionRow, Price, Transaction,
};

/// Point-in-time view of the existing ledger.
pub trait PositionQuery {
    /// Total units of `asset` held per account, over entries dated strictly before `before`.
    ///
    /// Row order is not significant.
    fn positions(&self, asset: &str, before: Date) -> Result<Vec<PositionRow>, HarvestError>;
}

impl<Q> PositionQuery for &Q
where
    Q: PositionQuery + ?Sized,
{
    fn positions(&self, asset: &str, before: Date) -> Result<Vec<PositionRow>, HarvestError> {
        (**self).positions(asset, before)
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Settings {
    pub base_currency: String,
    pub display_price: Decimal,
    pub withholding_label: String,
    pub symbol_suffix: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency().to_string(),
            display_price: default_display_price(),
            withholding_label: default_withholding_label().to_string(),
            symbol_suffix: default_symbol_suffix(),
        }
    }
}

impl Settings {
    // TODO price non-base income from the accrual's fxRateToBase rather than a fixed display price
    pub(crate) fn display_price_for(&self, currency: &str) -> Option<Price> {
        (currency != self.base_currency).then(|| Price {
            per_unit: self.display_price,
            currency: self.base_currency.clone(),
        })
    }
}

/// Turns accruals into dividend transactions, one per holding account.
#[derive(Debug)]
pub struct Engine<Q> {
    query: Q,
    settings: Settings,
    posted: HashSet<String>,
}

impl<Q> Engine<Q>
where
    Q: PositionQuery,
{
    pub fn new(query: Q, settings: Settings) -> Self {
        Self {
            query,
            settings,
            posted: HashSet::default(),
        }
    }

    /// Posting keys of accruals already in the ledger, which are then never posted again.
    pub fn with_posted<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.posted.extend(keys);
        self
    }

    /// All transactions for the eligible accruals, in accrual order.
    ///
    /// Fails on the first accrual which can't be allocated, in which case nothing is returned.
    pub fn harvest<'a, I>(&self, accruals: I, today: Date) -> Result<Vec<Transaction>, HarvestError>
    where
        I: IntoIterator<Item = &'a AccrualRecord>,
    {
        let mut transactions = Vec::default();
        let mut harvested = HashSet::<String>::default();

        for accrual in eligible(accruals, today) {
            let posting_key = accrual.posting_key();
            if self.posted.contains(&posting_key) {
                tracing::info!("skipping {posting_key}, already posted");
                continue;
            }
            if harvested.contains(&posting_key) {
                tracing::info!("skipping {posting_key}, repeated in statement");
                continue;
            }

            transactions.extend(self.post(accrual)?);
            harvested.insert(posting_key);
        }

        Ok(transactions)
    }

    /// The transactions for a single accrual, regardless of its eligibility.
    pub fn post(&self, accrual: &AccrualRecord) -> Result<Vec<Transaction>, HarvestError> {
        let asset = accrual.asset(self.settings.symbol_suffix);

        tracing::debug!(
            "posting {} ({asset}) ex {} paid {} gross {:?} fee {:?} fx {:?}",
            &accrual.symbol,
            accrual.ex_date,
            accrual.pay_date,
            accrual.gross_amount,
            accrual.fee,
            accrual.fx_rate_to_base,
        );

        let rows = self.query.positions(asset, accrual.ex_date)?;
        let shares = allocate(accrual, rows)?;

        let accounts = shares
            .iter()
            .map(|share| {
                DerivedAccounts::derive(
                    &share.account,
                    asset,
                    &accrual.currency,
                    &self.settings.withholding_label,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let posting_key = accrual.posting_key();
        let context = DividendContext {
            asset,
            currency: &accrual.currency,
            date: accrual.pay_date,
            posting_key: &posting_key,
        };

        Ok(shares
            .iter()
            .zip(accounts)
            .map(|(share, accounts)| {
                Transaction::dividend(share, accounts, &context, &self.settings)
            })
            .collect())
    }
}
