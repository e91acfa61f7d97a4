use rust_decimal::Decimal;
use std::{error::Error, fmt::Display};

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum HarvestError {
    /// The ledger's position disagrees with the broker's reported quantity.
    Reconciliation {
        symbol: String,
        reported: Decimal,
        ours: Decimal,
    },
    /// Amounts are due on an accrual which nobody held.
    ZeroQuantity { symbol: String },
    Account(AccountError),
    Query(String),
}

impl Display for HarvestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use HarvestError::*;

        match self {
            Reconciliation {
                symbol,
                reported,
                ours,
            } => write!(
                f,
                "different total quantities for {symbol}, dividend: {reported} vs ours: {ours}"
            ),
            ZeroQuantity { symbol } => {
                write!(f, "can't allocate {symbol} dividend across zero quantity")
            }
            Account(e) => write!(f, "{e}"),
            Query(e) => write!(f, "position query failed: {e}"),
        }
    }
}

impl Error for HarvestError {}

impl From<AccountError> for HarvestError {
    fn from(value: AccountError) -> Self {
        HarvestError::Account(value)
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum AccountError {
    Malformed(String),
    MissingOwner(String),
    NotInvestment(String),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use AccountError::*;

        match self {
            Malformed(account) => write!(f, "malformed account {account}"),
            MissingOwner(account) => write!(f, "account {account} has no owner segment"),
            NotInvestment(account) => {
                write!(f, "account {account} is not an investment account")
            }
        }
    }
}

impl Error for AccountError {}
