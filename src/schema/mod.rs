//! Declarative per-entity schema registry
//!
//! One descriptor per entity drives everything the load path used to
//! hardcode: surrogate-key derivation, the required-column projection,
//! target renames, numeric coercion, row filters, and warehouse DDL.
//! Adding an entity means adding a descriptor, not another loader.

mod types;

pub use types::{AUDIT_COLUMNS, ColumnMapping, ColumnType, EntitySchema, RowFilter, SurrogateKeySpec};

use crate::types::EntityKind;

/// Users: one row per user record
static USERS: EntitySchema = EntitySchema {
    entity: EntityKind::Users,
    surrogate_key: SurrogateKeySpec {
        column: "sgk_user_id",
        natural_keys: &["user_id"],
    },
    business: &[
        ColumnMapping::new("user_id", "user_id", ColumnType::Integer),
        ColumnMapping::new("user_firstName", "first_name", ColumnType::Text),
        ColumnMapping::new("user_lastName", "last_name", ColumnType::Text),
        ColumnMapping::new("user_gender", "gender", ColumnType::Text),
        ColumnMapping::new("user_age", "age", ColumnType::Integer),
        ColumnMapping::new("user_address_address", "street", ColumnType::Text),
        ColumnMapping::new("user_address_city", "city", ColumnType::Text),
        ColumnMapping::new("user_address_postalCode", "postal_code", ColumnType::Text),
    ],
    filter: RowFilter::RequireNonNull {
        columns: &["user_id", "first_name", "last_name"],
    },
};

/// Carts: one row per cart line item
static CARTS: EntitySchema = EntitySchema {
    entity: EntityKind::Carts,
    surrogate_key: SurrogateKeySpec {
        column: "sgk_cart_id",
        natural_keys: &["user_id", "product_id", "cart_id"],
    },
    business: &[
        ColumnMapping::new("cart_id", "cart_id", ColumnType::Integer),
        ColumnMapping::new("user_id", "user_id", ColumnType::Integer),
        ColumnMapping::new("product_id", "product_id", ColumnType::Integer),
        ColumnMapping::new("product_quantity", "quantity", ColumnType::Integer),
        ColumnMapping::new("product_price", "price", ColumnType::Double),
        ColumnMapping::new("total_cart_value", "total_cart_value", ColumnType::Double),
    ],
    filter: RowFilter::RequireNonNull {
        columns: &["cart_id", "user_id", "product_id"],
    },
};

/// Products: one row per catalog product
static PRODUCTS: EntitySchema = EntitySchema {
    entity: EntityKind::Products,
    surrogate_key: SurrogateKeySpec {
        column: "sgk_product_id",
        natural_keys: &["product_id"],
    },
    business: &[
        ColumnMapping::new("product_id", "product_id", ColumnType::Integer),
        ColumnMapping::new("product_title", "name", ColumnType::Text),
        ColumnMapping::new("product_category", "category", ColumnType::Text),
        ColumnMapping::new("product_brand", "brand", ColumnType::Text),
        ColumnMapping::new("product_price", "price", ColumnType::Double),
    ],
    filter: RowFilter::PriceAbove {
        column: "price",
        floor: 50.0,
    },
};

/// Look up the schema descriptor for an entity
pub fn entity_schema(entity: EntityKind) -> &'static EntitySchema {
    match entity {
        EntityKind::Users => &USERS,
        EntityKind::Carts => &CARTS,
        EntityKind::Products => &PRODUCTS,
    }
}
