use rust_decimal::{Decimal, RoundingStrategy};

use crate::{AccrualRecord, HarvestError};

/// Decimal places of the settlement currency's minor unit.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Quantity of an asset held in a single account at some date.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct PositionRow {
    pub account: String,
    pub quantity: Decimal,
}

impl<S> From<(S, Decimal)> for PositionRow
where
    S: Into<String>,
{
    fn from(value: (S, Decimal)) -> Self {
        Self {
            account: value.0.into(),
            quantity: value.1,
        }
    }
}

/// One holding account's part of an accrual.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct AllocatedShare {
    pub account: String,
    pub payout: Decimal,
    pub withholding: Decimal,
    pub quantity: Decimal,
}

/// Split the accrual's payout and withholding across the holding accounts in proportion to quantity held.
///
/// The rows must first reconcile with the quantity reported by the broker.  Rows are
/// ordered by account and all but the last are rounded to the minor unit, the last
/// getting whatever remains, so the shares always sum exactly to the totals.
pub fn allocate(
    accrual: &AccrualRecord,
    rows: Vec<PositionRow>,
) -> Result<Vec<AllocatedShare>, HarvestError> {
    let mut rows = rows
        .into_iter()
        .filter(|row| !row.quantity.is_zero())
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| a.account.cmp(&b.account));

    let total_quantity = reconcile(accrual, &rows)?;

    if total_quantity.is_zero() {
        return if accrual.net_amount.is_zero() && accrual.tax.is_zero() {
            Ok(Vec::default())
        } else {
            Err(HarvestError::ZeroQuantity {
                symbol: accrual.symbol.clone(),
            })
        };
    }

    let mut remaining_payout = accrual.net_amount;
    let mut remaining_withholding = accrual.tax;
    let mut shares = Vec::with_capacity(rows.len());

    let last = rows.pop();
    for PositionRow { account, quantity } in rows {
        let payout = proportion(accrual.net_amount, quantity, total_quantity);
        let withholding = proportion(accrual.tax, quantity, total_quantity);
        remaining_payout -= payout;
        remaining_withholding -= withholding;

        shares.push(AllocatedShare {
            account,
            payout,
            withholding,
            quantity,
        });
    }

    if let Some(PositionRow { account, quantity }) = last {
        shares.push(AllocatedShare {
            account,
            payout: remaining_payout,
            withholding: remaining_withholding,
            quantity,
        });
    }

    tracing::debug!("allocated {} as {:?}", &accrual.symbol, &shares);

    Ok(shares)
}

fn reconcile(accrual: &AccrualRecord, rows: &[PositionRow]) -> Result<Decimal, HarvestError> {
    let ours = rows.iter().map(|row| row.quantity).sum::<Decimal>();

    if ours == accrual.quantity {
        Ok(ours)
    } else {
        Err(HarvestError::Reconciliation {
            symbol: accrual.symbol.clone(),
            reported: accrual.quantity,
            ours,
        })
    }
}

fn proportion(total: Decimal, quantity: Decimal, total_quantity: Decimal) -> Decimal {
    let mut share = (total * quantity / total_quantity)
        .round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointNearestEven);
    share.rescale(MINOR_UNIT_SCALE);
    share
}
