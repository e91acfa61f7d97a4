use rust_decimal::Decimal;
use time::Date;

use crate::{AccountPath, AllocatedShare, DerivedAccounts, Settings};

/// Metadata key under which each transaction records the accrual it was posted for.
pub const TXNID_KEY: &str = "txnid";

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Amount {
    pub number: Decimal,
    pub currency: String,
}

impl<S> From<(Decimal, S)> for Amount
where
    S: Into<String>,
{
    fn from(value: (Decimal, S)) -> Self {
        Self {
            number: value.0,
            currency: value.1.into(),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Price {
    pub per_unit: Decimal,
    pub currency: String,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Posting {
    pub(crate) account: AccountPath,
    pub(crate) amount: Option<Amount>,
    pub(crate) price: Option<Price>,
}

impl Posting {
    fn new(account: AccountPath, amount: Option<Amount>) -> Self {
        Self {
            account,
            amount,
            price: None,
        }
    }

    pub fn account(&self) -> &AccountPath {
        &self.account
    }

    /// `None` for the posting which takes up the residual.
    pub fn amount(&self) -> Option<&Amount> {
        self.amount.as_ref()
    }

    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Transaction {
    pub(crate) date: Date,
    pub(crate) narration: String,
    pub(crate) metadata: Vec<(&'static str, String)>,
    pub(crate) postings: Vec<Posting>,
}

/// What is common to all the transactions for an accrual.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DividendContext<'a> {
    pub(crate) asset: &'a str,
    pub(crate) currency: &'a str,
    pub(crate) date: Date,
    pub(crate) posting_key: &'a str,
}

impl Transaction {
    pub(crate) fn dividend(
        share: &AllocatedShare,
        accounts: DerivedAccounts,
        context: &DividendContext<'_>,
        settings: &Settings,
    ) -> Self {
        let DerivedAccounts {
            holding,
            liquidity,
            receivable,
            income,
        } = accounts;

        let mut postings = vec![
            Posting::new(holding, Some((Decimal::ZERO, context.asset).into())),
            Posting::new(liquidity, Some((share.payout, context.currency).into())),
        ];

        if share.withholding > Decimal::ZERO {
            postings.push(Posting::new(
                receivable,
                Some((share.withholding, context.currency).into()),
            ));
        }

        postings.push(Posting {
            account: income,
            amount: None,
            price: settings.display_price_for(context.currency),
        });

        Self {
            date: context.date,
            narration: format!("Dividend for {}", share.quantity),
            metadata: vec![(TXNID_KEY, context.posting_key.to_string())],
            postings,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn narration(&self) -> &str {
        &self.narration
    }

    pub fn metadata(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Sum of the postings with explicit amounts, by currency.
    pub fn residuals(&self) -> hashbrown::HashMap<&str, Decimal> {
        use hashbrown::hash_map::Entry::*;

        let mut residuals = hashbrown::HashMap::<&str, Decimal>::default();
        for amount in self.postings.iter().filter_map(Posting::amount) {
            match residuals.entry(amount.currency.as_str()) {
                Occupied(mut entry) => {
                    *entry.get_mut() += amount.number;
                }
                Vacant(entry) => {
                    entry.insert(amount.number);
                }
            }
        }
        residuals
    }

    /// The amount taken by the posting without units, which offsets the single non-zero residual.
    pub fn interpolated_income(&self) -> Option<Amount> {
        let mut nonzero = self
            .residuals()
            .into_iter()
            .filter(|(_, number)| !number.is_zero());

        match (nonzero.next(), nonzero.next()) {
            (Some((currency, number)), None) => Some((-number, currency).into()),
            _ => None,
        }
    }

    /// Whether the postings sum to zero in every currency, once any missing amount is interpolated.
    pub fn is_balanced(&self) -> bool {
        let auto_postings = self
            .postings
            .iter()
            .filter(|posting| posting.amount.is_none())
            .count();
        let nonzero_residuals = self
            .residuals()
            .values()
            .filter(|number| !number.is_zero())
            .count();

        match auto_postings {
            0 => nonzero_residuals == 0,
            1 => nonzero_residuals <= 1,
            _ => false,
        }
    }
}
