use rust_decimal::Decimal;
use serde::Deserialize;
use strum_macros::Display;
use time::Date;

/// Status of an accrual as reported by the broker.
#[derive(Deserialize, Display, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AccrualCode {
    #[serde(rename = "Po")]
    #[strum(serialize = "Po")]
    Posted,
    #[serde(rename = "Re")]
    #[strum(serialize = "Re")]
    Reversed,
    /// Any other status, such as a cancellation or a re-statement.
    #[serde(other)]
    #[strum(serialize = "other")]
    Other,
}

/// A change in dividend accruals, as delivered by the broker's statement.
///
/// Amounts are in the settlement `currency`, `net_amount` being the payout after
/// withholding `tax`.
#[derive(Deserialize, PartialEq, Eq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccrualRecord {
    pub code: AccrualCode,
    pub symbol: String,
    pub currency: String,
    pub ex_date: Date,
    pub pay_date: Date,
    pub quantity: Decimal,
    pub net_amount: Decimal,
    pub tax: Decimal,

    // informational only
    #[serde(default)]
    pub gross_amount: Option<Decimal>,
    #[serde(default)]
    pub fee: Option<Decimal>,
    #[serde(default)]
    pub fx_rate_to_base: Option<Decimal>,
}

impl AccrualRecord {
    pub fn is_reversed(&self) -> bool {
        self.code == AccrualCode::Reversed
    }

    /// The commodity used in the ledger, which is the feed symbol without its suffix.
    pub fn asset(&self, symbol_suffix: char) -> &str {
        self.symbol
            .strip_suffix(symbol_suffix)
            .unwrap_or(&self.symbol)
    }

    /// Identifies the accrual across runs, so it is only ever posted once.
    pub fn posting_key(&self) -> String {
        format!("{}-{}-{}", self.symbol, self.ex_date, self.pay_date)
    }
}
