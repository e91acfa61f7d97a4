//! Settings used when nothing else is configured.

use rust_decimal::Decimal;

/// Currency the books are kept in.
pub fn default_base_currency() -> &'static str {
    "CHF"
}

/// Placeholder conversion price for income in a currency other than the base currency.
pub fn default_display_price() -> Decimal {
    Decimal::new(99, 2) // 0.99
}

pub fn default_withholding_label() -> &'static str {
    "Verrechnungssteuer"
}

/// The feed marks dividend accrual symbols with this suffix.
pub fn default_symbol_suffix() -> char {
    'z'
}
