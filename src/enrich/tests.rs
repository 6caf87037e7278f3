//! Tests for audit enrichment and surrogate keys

use super::*;
use crate::config::AuditConfig;
use pretty_assertions::assert_eq;
use serde_json::json;

fn test_enricher() -> Enricher {
    Enricher::new(&AuditConfig {
        created_by: "storefront-etl".to_string(),
        source_system: "PUBLIC_STOREFRONT_API".to_string(),
    })
}

fn single_row_table(cells: &[(&str, serde_json::Value)]) -> FlatTable {
    let mut row = FlatRow::new();
    for (column, value) in cells {
        row.insert(*column, value.clone());
    }
    let mut table = FlatTable::new();
    table.push_row(row);
    table
}

#[test]
fn test_audit_columns_appended() {
    let mut table = single_row_table(&[("user_id", json!(1))]);
    test_enricher().enrich(&mut table, EntityKind::Users);

    let row = &table.rows()[0];
    assert_eq!(row.get("record_create_name"), Some(&json!("storefront-etl")));
    assert_eq!(row.get("record_update_name"), Some(&json!("storefront-etl")));
    assert_eq!(
        row.get("source_system_code"),
        Some(&json!("PUBLIC_STOREFRONT_API"))
    );
    assert!(row.get("record_create_datetime").is_some());
}

#[test]
fn test_update_mirrors_create() {
    let mut table = single_row_table(&[("user_id", json!(1))]);
    test_enricher().enrich(&mut table, EntityKind::Users);

    let row = &table.rows()[0];
    assert_eq!(
        row.get("record_create_datetime"),
        row.get("record_update_datetime")
    );
}

#[test]
fn test_rows_share_one_timestamp() {
    let mut table = FlatTable::new();
    for id in 0..3 {
        let mut row = FlatRow::new();
        row.insert("user_id", json!(id));
        table.push_row(row);
    }
    test_enricher().enrich(&mut table, EntityKind::Users);

    let first = table.rows()[0].get("record_create_datetime").cloned();
    for row in table.rows() {
        assert_eq!(row.get("record_create_datetime"), first.as_ref());
    }
}

#[test]
fn test_user_surrogate_key() {
    let mut table = single_row_table(&[("user_id", json!(1))]);
    test_enricher().enrich(&mut table, EntityKind::Users);

    // md5("1")
    assert_eq!(
        table.rows()[0].get("sgk_user_id"),
        Some(&json!("c4ca4238a0b923820dcc509a6f75849b"))
    );
}

#[test]
fn test_product_surrogate_key_integer_rendering() {
    // An integer id renders as "7", never "7.0"
    let mut table = single_row_table(&[("product_id", json!(7))]);
    test_enricher().enrich(&mut table, EntityKind::Products);

    // md5("7")
    assert_eq!(
        table.rows()[0].get("sgk_product_id"),
        Some(&json!("8f14e45fceea167a5a36dedd4bea2543"))
    );
}

#[test]
fn test_cart_surrogate_key_concatenation_order() {
    // user, product, cart - concatenated with no separator
    let mut table = single_row_table(&[
        ("cart_id", json!(42)),
        ("user_id", json!(9)),
        ("product_id", json!(1)),
    ]);
    test_enricher().enrich(&mut table, EntityKind::Carts);

    // md5("9142")
    assert_eq!(
        table.rows()[0].get("sgk_cart_id"),
        Some(&json!("7c21c080c204c2ec7523ae6fc12033a6"))
    );
}

#[test]
fn test_missing_natural_key_hashes_empty() {
    let mut table = single_row_table(&[("user_firstName", json!("Ada"))]);
    test_enricher().enrich(&mut table, EntityKind::Users);

    // md5("")
    assert_eq!(
        table.rows()[0].get("sgk_user_id"),
        Some(&json!("d41d8cd98f00b204e9800998ecf8427e"))
    );
}

#[test]
fn test_scalar_text_rendering() {
    assert_eq!(scalar_text(&json!("abc")), "abc");
    assert_eq!(scalar_text(&json!(7)), "7");
    assert_eq!(scalar_text(&json!(7.5)), "7.5");
    assert_eq!(scalar_text(&json!(true)), "true");
    assert_eq!(scalar_text(&json!(null)), "");
}
