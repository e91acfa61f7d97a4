use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    format::{format, plain},
    AccountError,
};

const SEPARATOR: &str = ":";

const ASSETS: &str = "Assets";
const INCOME: &str = "Income";
const INVESTMENT: &str = "Investment";
const LIQUIDITY: &str = "Liquidity";
const RECEIVABLE: &str = "Receivable";
const INTEREST: &str = "Interest";

/// An account name as its colon-separated segments.
///
/// The first segment is the account type, the second the owner, e.g.
/// `Assets:Alice:Investment:IBKR:ZFOO`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub struct AccountPath {
    segments: Vec<String>,
}

impl AccountPath {
    fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    pub fn owner(&self) -> Option<&str> {
        self.segments.get(1).map(String::as_str)
    }

    fn owner_or_err(&self) -> Result<&str, AccountError> {
        self.owner()
            .ok_or_else(|| AccountError::MissingOwner(self.to_string()))
    }

    /// Where the cash lands: `Investment` becomes `Liquidity` and the asset segment becomes the currency.
    pub fn liquidity(&self, asset: &str, currency: &str) -> Result<Self, AccountError> {
        self.owner_or_err()?;

        // account type and owner are never rewritten
        if !self.segments.iter().skip(2).any(|s| s == INVESTMENT) {
            return Err(AccountError::NotInvestment(self.to_string()));
        }

        Ok(Self::from_segments(self.segments.iter().enumerate().map(
            |(i, segment)| {
                if i < 2 {
                    segment.as_str()
                } else if segment == INVESTMENT {
                    LIQUIDITY
                } else if segment == asset {
                    currency
                } else {
                    segment.as_str()
                }
            },
        )))
    }

    /// Where withheld tax is reclaimed, e.g. `Assets:Alice:Receivable:Verrechnungssteuer`.
    pub fn receivable(&self, withholding_label: &str) -> Result<Self, AccountError> {
        let owner = self.owner_or_err()?;
        Ok(Self::from_segments([
            ASSETS,
            owner,
            RECEIVABLE,
            withholding_label,
        ]))
    }

    pub fn income(&self) -> Result<Self, AccountError> {
        let owner = self.owner_or_err()?;
        Ok(Self::from_segments([INCOME, owner, INTEREST]))
    }
}

impl FromStr for AccountPath {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s.split(SEPARATOR).collect::<Vec<_>>();
        if segments.iter().any(|segment| segment.is_empty()) {
            Err(AccountError::Malformed(s.to_string()))
        } else {
            Ok(Self::from_segments(segments))
        }
    }
}

impl Display for AccountPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        format(f, self.segments(), plain, SEPARATOR, None)
    }
}

/// All the accounts touched by one holding account's dividend transaction.
///
/// These are derived up front so that an unusable holding account is rejected
/// before any transaction for the accrual is built.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DerivedAccounts {
    pub holding: AccountPath,
    pub liquidity: AccountPath,
    pub receivable: AccountPath,
    pub income: AccountPath,
}

impl DerivedAccounts {
    pub fn derive(
        holding: &str,
        asset: &str,
        currency: &str,
        withholding_label: &str,
    ) -> Result<Self, AccountError> {
        let holding = holding.parse::<AccountPath>()?;
        let liquidity = holding.liquidity(asset, currency)?;
        let receivable = holding.receivable(withholding_label)?;
        let income = holding.income()?;

        Ok(Self {
            holding,
            liquidity,
            receivable,
            income,
        })
    }
}
