//! Tests for the JSON flattener

use super::*;
use crate::types::EntityKind;
use pretty_assertions::assert_eq;
use serde_json::json;

fn raw_line(data: serde_json::Value) -> String {
    json!({
        "metadata": {"extraction_timestamp": "2024-01-01T00:00:00"},
        "data": data,
    })
    .to_string()
}

// ============================================================================
// Users / products (prefixed) strategy
// ============================================================================

#[test]
fn test_user_flattening_scalars_and_nested() {
    let line = raw_line(json!({
        "id": 1,
        "firstName": "Ada",
        "age": 36,
        "address": {"address": "1 Main St", "city": "Nairobi", "postalCode": "00100"},
        "tags": ["a", "b", "c"]
    }));

    let table = flatten_ndjson(&line, Some(EntityKind::Users));
    assert_eq!(table.len(), 1);
    let row = &table.rows()[0];

    assert_eq!(row.get("user_id"), Some(&json!(1)));
    assert_eq!(row.get("user_firstName"), Some(&json!("Ada")));
    assert_eq!(row.get("user_address_city"), Some(&json!("Nairobi")));
    assert_eq!(row.get("user_address_postalCode"), Some(&json!("00100")));
    // List contents dropped, only the count survives
    assert_eq!(row.get("user_tags_count"), Some(&json!(3)));
    assert_eq!(row.get("user_tags"), None);
    assert_eq!(row.get("user_tags_0"), None);
    // Envelope metadata merged with prefix
    assert_eq!(
        row.get("metadata_extraction_timestamp"),
        Some(&json!("2024-01-01T00:00:00"))
    );
}

#[test]
fn test_product_flattening_worked_example() {
    let line = r#"{"metadata":{"extraction_timestamp":"2024-01-01T00:00:00"},"data":{"id":7,"title":"Widget","price":60}}"#;

    let table = flatten_ndjson(line, Some(EntityKind::Products));
    assert_eq!(table.len(), 1);
    let row = &table.rows()[0];

    assert_eq!(row.get("product_id"), Some(&json!(7)));
    assert_eq!(row.get("product_title"), Some(&json!("Widget")));
    assert_eq!(row.get("product_price"), Some(&json!(60)));
    assert_eq!(
        row.get("metadata_extraction_timestamp"),
        Some(&json!("2024-01-01T00:00:00"))
    );
}

#[test]
fn test_flattening_is_pure() {
    let line = raw_line(json!({
        "id": 3,
        "title": "Gizmo",
        "dimensions": {"width": 10, "height": 4},
        "images": ["a.png", "b.png"]
    }));

    let first = flatten_ndjson(&line, Some(EntityKind::Products));
    let second = flatten_ndjson(&line, Some(EntityKind::Products));

    assert_eq!(first.columns(), second.columns());
    assert_eq!(first.rows(), second.rows());
}

#[test]
fn test_null_fields_dropped() {
    let line = raw_line(json!({"id": 1, "brand": null}));

    let table = flatten_ndjson(&line, Some(EntityKind::Products));
    let row = &table.rows()[0];
    assert_eq!(row.get("product_id"), Some(&json!(1)));
    assert_eq!(row.get("product_brand"), None);
}

// ============================================================================
// Cart fan-out
// ============================================================================

#[test]
fn test_cart_expands_one_row_per_item() {
    let line = raw_line(json!({
        "id": 42,
        "userId": 9,
        "total": 103.0,
        "discountedTotal": 98.0,
        "totalProducts": 2,
        "totalQuantity": 3,
        "products": [
            {"id": 1, "title": "Pen", "price": 1.5, "quantity": 2,
             "total": 3.0, "discountPercentage": 0.0, "discountedTotal": 3.0,
             "thumbnail": "pen.png"},
            {"id": 2, "title": "Desk", "price": 100.0, "quantity": 1,
             "total": 100.0, "discountPercentage": 5.0, "discountedTotal": 95.0,
             "thumbnail": "desk.png"}
        ]
    }));

    let table = flatten_ndjson(&line, Some(EntityKind::Carts));
    assert_eq!(table.len(), 2);

    // Cart-level fields identical across rows
    for row in table.rows() {
        assert_eq!(row.get("cart_id"), Some(&json!(42)));
        assert_eq!(row.get("user_id"), Some(&json!(9)));
        assert_eq!(row.get("total_cart_value"), Some(&json!(103.0)));
        assert_eq!(row.get("total_quantity"), Some(&json!(3)));
    }

    // Item-level fields differ
    assert_eq!(table.rows()[0].get("product_id"), Some(&json!(1)));
    assert_eq!(table.rows()[0].get("product_title"), Some(&json!("Pen")));
    assert_eq!(table.rows()[1].get("product_id"), Some(&json!(2)));
    assert_eq!(
        table.rows()[1].get("product_discounted_total"),
        Some(&json!(95.0))
    );
}

#[test]
fn test_cart_with_zero_items_produces_zero_rows() {
    let line = raw_line(json!({
        "id": 42,
        "userId": 9,
        "total": 0.0,
        "products": []
    }));

    let table = flatten_ndjson(&line, Some(EntityKind::Carts));
    assert!(table.is_empty());
}

#[test]
fn test_cart_missing_item_field_is_null() {
    let line = raw_line(json!({
        "id": 1,
        "userId": 2,
        "products": [{"id": 5, "title": "Lamp"}]
    }));

    let table = flatten_ndjson(&line, Some(EntityKind::Carts));
    let row = &table.rows()[0];
    assert_eq!(row.get("product_id"), Some(&json!(5)));
    assert_eq!(row.get("product_price"), Some(&json!(null)));
    assert_eq!(row.get("product_thumbnail"), Some(&json!(null)));
}

// ============================================================================
// General fallback
// ============================================================================

#[test]
fn test_general_flattening_nested_objects() {
    let value = json!({
        "a": 1,
        "b": {"c": 2, "d": {"e": 3}}
    });

    let row = flatten_general(&value, "_");
    assert_eq!(row.get("a"), Some(&json!(1)));
    assert_eq!(row.get("b_c"), Some(&json!(2)));
    assert_eq!(row.get("b_d_e"), Some(&json!(3)));
}

#[test]
fn test_general_flattening_lists_join_index() {
    let value = json!({
        "tags": ["x", "y"],
        "items": [{"price": 5}, {"price": 7}]
    });

    let row = flatten_general(&value, "_");
    assert_eq!(row.get("tags_0"), Some(&json!("x")));
    assert_eq!(row.get("tags_1"), Some(&json!("y")));
    assert_eq!(row.get("items_0_price"), Some(&json!(5)));
    assert_eq!(row.get("items_1_price"), Some(&json!(7)));
}

#[test]
fn test_unknown_entity_uses_general_fallback() {
    let line = raw_line(json!({"id": 1, "nested": {"x": true}}));

    let table = flatten_ndjson(&line, None);
    assert_eq!(table.len(), 1);
    let row = &table.rows()[0];
    assert_eq!(row.get("data_id"), Some(&json!(1)));
    assert_eq!(row.get("data_nested_x"), Some(&json!(true)));
}

// ============================================================================
// Error policy
// ============================================================================

#[test]
fn test_malformed_line_is_skipped() {
    let lines = format!(
        "{}\nthis is not json\n{}",
        raw_line(json!({"id": 1, "title": "A", "price": 10})),
        raw_line(json!({"id": 2, "title": "B", "price": 20})),
    );

    let table = flatten_ndjson(&lines, Some(EntityKind::Products));
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].get("product_id"), Some(&json!(1)));
    assert_eq!(table.rows()[1].get("product_id"), Some(&json!(2)));
}

#[test]
fn test_non_object_data_is_skipped() {
    let lines = format!(
        "{}\n{}",
        json!({"metadata": {}, "data": [1, 2, 3]}),
        raw_line(json!({"id": 9})),
    );

    let table = flatten_ndjson(&lines, Some(EntityKind::Products));
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].get("product_id"), Some(&json!(9)));
}

#[test]
fn test_blank_lines_ignored() {
    let lines = format!("\n{}\n\n", raw_line(json!({"id": 1})));
    let table = flatten_ndjson(&lines, Some(EntityKind::Users));
    assert_eq!(table.len(), 1);
}

// ============================================================================
// Table mechanics
// ============================================================================

#[test]
fn test_table_column_order_first_appearance() {
    let mut table = FlatTable::new();
    let mut row1 = FlatRow::new();
    row1.insert("a", json!(1));
    row1.insert("b", json!(2));
    table.push_row(row1);

    let mut row2 = FlatRow::new();
    row2.insert("b", json!(3));
    row2.insert("c", json!(4));
    table.push_row(row2);

    assert_eq!(table.columns(), &["a", "b", "c"]);
}

#[test]
fn test_append_column() {
    let mut table = FlatTable::new();
    let mut row = FlatRow::new();
    row.insert("x", json!(2));
    table.push_row(row);

    table.append_column("doubled", |r| {
        json!(r.get("x").and_then(serde_json::Value::as_i64).unwrap() * 2)
    });

    assert_eq!(table.rows()[0].get("doubled"), Some(&json!(4)));
    assert!(table.has_column("doubled"));
}
