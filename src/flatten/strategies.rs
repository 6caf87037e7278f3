//! Flattening strategy implementations
//!
//! Each strategy turns one record's `data` object into flat rows.

use super::types::FlatRow;
use crate::types::{JsonObject, JsonValue};

// ============================================================================
// Prefixed flattening (users, products)
// ============================================================================

/// Flatten a record to a single row with `<prefix>_` column names.
///
/// - top-level scalars become `<prefix>_<field>`
/// - one level of nested-object fields becomes `<prefix>_<field>_<sub>`
/// - list-valued fields are reduced to `<prefix>_<field>_count`; their
///   contents are dropped (documented information loss, not a bug)
/// - null-valued fields are dropped
pub fn flatten_prefixed(data: &JsonObject, prefix: &str) -> FlatRow {
    let mut row = FlatRow::new();

    // Scalars first, then nested structures, so scalar columns lead
    for (key, value) in data {
        if is_scalar(value) {
            row.insert(format!("{prefix}_{key}"), value.clone());
        }
    }

    for (key, value) in data {
        match value {
            JsonValue::Object(nested) => {
                for (sub_key, sub_value) in nested {
                    row.insert(format!("{prefix}_{key}_{sub_key}"), sub_value.clone());
                }
            }
            JsonValue::Array(items) => {
                row.insert(format!("{prefix}_{key}_count"), JsonValue::from(items.len()));
            }
            _ => {}
        }
    }

    row
}

// ============================================================================
// Cart flattening (one-to-many)
// ============================================================================

/// Cart-level fields, extracted once per cart
const CART_FIELDS: [(&str, &str); 6] = [
    ("id", "cart_id"),
    ("userId", "user_id"),
    ("total", "total_cart_value"),
    ("discountedTotal", "discounted_total_cart_value"),
    ("totalProducts", "total_products"),
    ("totalQuantity", "total_quantity"),
];

/// Per-line-item fields
const CART_ITEM_FIELDS: [(&str, &str); 8] = [
    ("id", "product_id"),
    ("title", "product_title"),
    ("price", "product_price"),
    ("quantity", "product_quantity"),
    ("total", "product_total"),
    ("discountPercentage", "product_discount_percentage"),
    ("discountedTotal", "product_discounted_total"),
    ("thumbnail", "product_thumbnail"),
];

/// Flatten a cart record into one row per line item.
///
/// The line items are the fan-out unit: a cart with zero items produces
/// zero rows. Every row repeats the cart-level fields and differs only
/// in the item-level fields.
pub fn flatten_carts(data: &JsonObject) -> Vec<FlatRow> {
    let cart_info: FlatRow = CART_FIELDS
        .iter()
        .map(|(source, target)| {
            (
                (*target).to_string(),
                data.get(*source).cloned().unwrap_or(JsonValue::Null),
            )
        })
        .collect();

    let Some(products) = data.get("products").and_then(JsonValue::as_array) else {
        return Vec::new();
    };

    products
        .iter()
        .map(|product| {
            let mut row = cart_info.clone();
            for (source, target) in CART_ITEM_FIELDS {
                row.insert(
                    target,
                    product.get(source).cloned().unwrap_or(JsonValue::Null),
                );
            }
            row
        })
        .collect()
}

// ============================================================================
// General flattening (fallback)
// ============================================================================

/// Recursive key-path flattening for unknown record shapes.
///
/// Nested objects merge into the parent with keys joined by `separator`.
/// List elements join their index into the key path (`tags_0`,
/// `items_1_price`), so the result is always exactly one row per record.
pub fn flatten_general(value: &JsonValue, separator: &str) -> FlatRow {
    let mut row = FlatRow::new();
    flatten_general_into(value, "", separator, &mut row);
    row
}

fn flatten_general_into(value: &JsonValue, path: &str, separator: &str, out: &mut FlatRow) {
    match value {
        JsonValue::Object(map) => {
            for (key, child) in map {
                let child_path = join_path(path, key, separator);
                flatten_general_into(child, &child_path, separator, out);
            }
        }
        JsonValue::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let child_path = join_path(path, &index.to_string(), separator);
                flatten_general_into(child, &child_path, separator, out);
            }
        }
        leaf => {
            out.insert(path, leaf.clone());
        }
    }
}

fn join_path(path: &str, key: &str, separator: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}{separator}{key}")
    }
}

/// True for JSON string, number, or bool
fn is_scalar(value: &JsonValue) -> bool {
    matches!(
        value,
        JsonValue::String(_) | JsonValue::Number(_) | JsonValue::Bool(_)
    )
}
