use rust_decimal_macros::dec;
use std::{fs, path::PathBuf};

use super::*;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dividend-harvest-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn accepts_flex_section_name() {
    let statement = serde_json::from_str::<Statement>(
        r#"{
            "changeInDividendAccruals": [
                {
                    "code": "Po",
                    "symbol": "ZFOOz",
                    "currency": "USD",
                    "exDate": "2024-03-01",
                    "payDate": "2024-03-15",
                    "quantity": 100,
                    "netAmount": "85.00",
                    "tax": "15.00"
                }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(statement.accruals.len(), 1);
    assert_eq!(statement.accruals[0].symbol, "ZFOOz");
    assert_eq!(statement.accruals[0].net_amount, dec!(85.00));
}

#[test]
fn missing_statement_names_the_path() {
    let path = std::env::temp_dir().join("dividend-harvest-no-such-statement.json");

    let err = Statement::read_from(&path).unwrap_err();

    assert_eq!(err.to_string(), format!("failed to read {path:?}"));
}

#[test]
fn malformed_statement_names_the_path() {
    let path = scratch_file("malformed.json", r#"{"accruals": [{"code": "Po"}]}"#);

    let err = Statement::read_from(&path).unwrap_err();
    fs::remove_file(&path).unwrap();

    assert_eq!(
        err.to_string(),
        format!("failed to deserialize statement in {path:?}")
    );
}

#[test]
fn reads_statement_file() {
    let path = scratch_file("empty.json", r#"{"accruals": []}"#);

    let statement = Statement::read_from(&path);
    fs::remove_file(&path).unwrap();

    assert!(statement.unwrap().accruals.is_empty());
}
