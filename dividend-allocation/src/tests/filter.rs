use rstest::rstest;
use rust_decimal_macros::dec;
use time::{macros::date, Date};

use super::accrual;
use crate::{eligible, AccrualCode, AccrualRecord};

fn paid_on(symbol: &str, pay_date: Date) -> AccrualRecord {
    accrual(
        symbol,
        "USD",
        (date!(2024-03-01), pay_date),
        dec!(100),
        dec!(85.00),
        dec!(15.00),
    )
}

#[test]
fn excludes_reversed_and_unpaid() {
    let mut reversed = paid_on("REVz", date!(2024-03-10));
    reversed.code = AccrualCode::Reversed;

    let accruals = vec![
        paid_on("PAIDz", date!(2024-03-10)),
        reversed,
        paid_on("FUTUREz", date!(2024-04-10)),
        paid_on("TODAYz", date!(2024-03-15)),
    ];

    let symbols = eligible(&accruals, date!(2024-03-15))
        .map(|accrual| accrual.symbol.as_str())
        .collect::<Vec<_>>();

    assert_eq!(symbols, vec!["PAIDz", "TODAYz"]);
}

#[test]
fn future_accrual_becomes_eligible_once_paid() {
    let accruals = vec![paid_on("FUTUREz", date!(2024-04-10))];

    assert_eq!(eligible(&accruals, date!(2024-04-09)).count(), 0);
    assert_eq!(eligible(&accruals, date!(2024-04-10)).count(), 1);
}

#[test]
fn unknown_codes_are_not_reversals() {
    let accrual = serde_json::from_str::<AccrualRecord>(
        r#"{
            "code": "Ca",
            "symbol": "ZFOOz",
            "currency": "USD",
            "exDate": "2024-03-01",
            "payDate": "2024-03-15",
            "quantity": "100",
            "netAmount": "85.00",
            "tax": "15.00"
        }"#,
    )
    .unwrap();

    assert_eq!(accrual.code, AccrualCode::Other);
    assert_eq!(eligible([&accrual], date!(2024-03-15)).count(), 1);
}

#[rstest]
#[case(AccrualCode::Posted, "Po")]
#[case(AccrualCode::Reversed, "Re")]
#[case(AccrualCode::Other, "other")]
fn code_displays_as_reported(#[case] code: AccrualCode, #[case] expected: &str) {
    assert_eq!(code.to_string(), expected);
}
