//! CLI integration tests for facet commands.
//!
//! These tests focus on exit codes and key output, not exact formatting.

// Integration test crates have no test module to live in.
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// A small catalogue: two products in stock in shop 10, one out of stock.
const CATALOG: &str = r#"{
    "attributes": [{ "code": "color" }],
    "new_arrivals": { "0": "2024-01-01" },
    "products": [
        {
            "productId": 1, "name": "Trail running shoe", "brand": "Acme",
            "shopId": 10, "shopHasPrice": 10, "shopInStockFlag1": 10,
            "facet_color": "red", "featured_boost": 100.0
        },
        {
            "productId": 2, "name": "Road shoe", "brand": "Bolt",
            "shopId": 10, "shopHasPrice": 10, "shopInStockFlag1": 10,
            "facet_color": "blue"
        },
        {
            "productId": 3, "name": "Rain jacket", "brand": "Acme",
            "shopId": 10, "shopHasPrice": 10, "shopInStockFlag0": 10,
            "facet_color": "red"
        }
    ],
    "skus": [
        { "skuId": 11, "productId": 1, "code": "TS-RED-42", "facet_color": "red" },
        { "skuId": 21, "productId": 2, "code": "RS-BLU-42", "facet_color": "blue" }
    ]
}"#;

/// Helper to create a temp directory holding the catalogue.
fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("catalog.json"), CATALOG).unwrap();
    dir
}

/// Helper to run `facet` in `dir` with HOME isolated to it.
fn facet(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("facet").unwrap();
    cmd.current_dir(dir).env("HOME", dir);
    cmd
}

/// Runs a command and parses its JSON output.
fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

mod compile {
    use super::*;

    #[test]
    fn prints_committed_queries() {
        let dir = workspace();
        facet(dir.path())
            .args(["compile", "--catalog", "catalog.json", "--shop", "10"])
            .args(["-f", "brand=Acme"])
            .assert()
            .success()
            .stdout(predicate::str::contains("brand = Acme"))
            .stdout(predicate::str::contains("(brand:acme)^1.0"))
            .stdout(predicate::str::contains("shopInStockFlag1:10"))
            .stdout(predicate::str::contains("Tier: strict"));
    }

    #[test]
    fn json_reports_relaxation() {
        let dir = workspace();
        let json = json_output(
            facet(dir.path())
                .args(["compile", "--catalog", "catalog.json", "--shop", "10", "--json"])
                .args(["-f", "brand=nothing"]),
        );
        assert_eq!(json["relaxed"], true);
        assert_eq!(json["filters"][0]["name"], "brand");
        assert_eq!(json["filters"][0]["values"][0], "nothing");
        assert!(
            json["product_query"]
                .as_str()
                .unwrap()
                .contains("brand:nothing")
        );
    }

    #[test]
    fn drops_unknown_parameters() {
        let dir = workspace();
        let json = json_output(
            facet(dir.path())
                .args(["compile", "--catalog", "catalog.json", "--shop", "10", "--json"])
                .args(["-f", "size=xl"]),
        );
        assert_eq!(json["filters"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn missing_catalog_fails() {
        let dir = workspace();
        facet(dir.path())
            .args(["compile", "--catalog", "missing.json"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::starts_with("error:"));
    }

    #[test]
    fn malformed_filter_is_rejected() {
        let dir = workspace();
        facet(dir.path())
            .args(["compile", "--catalog", "catalog.json", "-f", "brand"])
            .assert()
            .failure();
    }
}

mod search {
    use super::*;

    #[test]
    fn lists_products_and_skus() {
        let dir = workspace();
        facet(dir.path())
            .args(["search", "--catalog", "catalog.json", "--shop", "10"])
            .args(["-f", "color=red"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Products (1):"))
            .stdout(predicate::str::contains("Trail running shoe"))
            .stdout(predicate::str::contains("SKUs (1):"))
            .stdout(predicate::str::contains("Rain jacket").not());
    }

    #[test]
    fn json_orders_by_score() {
        let dir = workspace();
        let json = json_output(
            facet(dir.path())
                .args(["search", "--catalog", "catalog.json", "--shop", "10", "--json"])
                .args(["-f", "query=shoe"]),
        );
        let products = json["products"].as_array().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0]["id"], 1);
        let skus = json["skus"].as_array().unwrap();
        assert_eq!(skus.len(), 2);
        assert_eq!(json["relaxed"], false);
    }

    #[test]
    fn limit_caps_results() {
        let dir = workspace();
        let json = json_output(
            facet(dir.path())
                .args(["search", "--catalog", "catalog.json", "--shop", "10", "--json"])
                .args(["-n", "1"]),
        );
        assert_eq!(json["products"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn other_shop_sees_nothing() {
        let dir = workspace();
        facet(dir.path())
            .args(["search", "--catalog", "catalog.json", "--shop", "99"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Products (0):"))
            .stdout(predicate::str::contains("Tier: relaxed"));
    }
}

mod check {
    use super::*;

    #[test]
    fn defaults_are_clean() {
        let dir = workspace();
        facet(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found"))
            .stdout(predicate::str::contains("No issues found."));
    }

    #[test]
    fn reports_warnings() {
        let dir = workspace();
        fs::write(
            dir.path().join(".facet.toml"),
            "root = true\n\n[keyword]\nmin_word_length = 0\n\n[index]\nstemmer = \"klingon\"\n",
        )
        .unwrap();
        facet(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("Warnings (2):"))
            .stdout(predicate::str::contains("klingon"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = workspace();
        fs::write(dir.path().join(".facet.toml"), "[keyword\n").unwrap();
        facet(dir.path())
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn stemmer_from_config_is_used_for_indexing() {
        let dir = workspace();
        fs::write(
            dir.path().join(".facet.toml"),
            "root = true\n\n[index]\nstemmer = \"klingon\"\n",
        )
        .unwrap();
        facet(dir.path())
            .args(["compile", "--catalog", "catalog.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unsupported stemmer language"));
    }
}
