use time::Date;

use crate::AccrualRecord;

/// Accruals ready for posting, that is, not reversed and already paid by `today`.
///
/// Those with a pay date still in the future are left for a later run.
/// Only a reversal code excludes an accrual, other codes are posted as normal.
pub fn eligible<'a, I>(accruals: I, today: Date) -> impl Iterator<Item = &'a AccrualRecord>
where
    I: IntoIterator<Item = &'a AccrualRecord>,
{
    accruals.into_iter().filter(move |accrual| {
        if accrual.is_reversed() {
            tracing::debug!("skipping {} with code {}", &accrual.symbol, accrual.code);
            false
        } else {
            accrual.pay_date <= today
        }
    })
}
