//! Smoke tests for the stocklens binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_stock_query_aggregates_variants() {
    let stock = csv_file(
        "ref;color;size;stock\n\
         IB220A;Off White;2XL;5\n\
         IB220;Off White;2XL;3\n",
    );

    Command::cargo_bin("stocklens")
        .unwrap()
        .args(["--stock-csv"])
        .arg(stock.path())
        .args(["stock", "IB220", "off white", "2XL"])
        .assert()
        .success()
        .stdout("8\n");
}

#[test]
fn test_refs_json_output() {
    let stock = csv_file("ref;color;size;stock\nIB220A;Navy;M;4\n");

    Command::cargo_bin("stocklens")
        .unwrap()
        .args(["--stock-csv"])
        .arg(stock.path())
        .args(["refs", "--format", "json"])
        .assert()
        .success()
        .stdout("[\"IB220\"]\n");
}

#[test]
fn test_reappro_without_match_reports_nothing_scheduled() {
    let reappro = csv_file("ref;color;size;qty;date to receive\nIB220;Navy;M;2;-\n");

    Command::cargo_bin("stocklens")
        .unwrap()
        .args(["--reappro-csv"])
        .arg(reappro.path())
        .args(["reappro", "IB999", "Navy", "M"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no replenishment scheduled"));
}

#[test]
fn test_missing_source_is_an_error() {
    Command::cargo_bin("stocklens")
        .unwrap()
        .args(["refs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stock source configured"));
}
