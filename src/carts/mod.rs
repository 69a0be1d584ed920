//! Cart invariant engine: payload synthesis for cart mutations and
//! independent verification of the service's cart arithmetic.

use rand::Rng;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::config::endpoints;
use crate::schema::Cart;

/// Generate `n` `{id, quantity}` product lines for a cart request.
///
/// With `n` at most the catalog size, ids are the sequential distinct
/// values `1..=n`, which keeps the payload free of duplicate-product
/// ambiguity. Past the catalog size the ids are drawn randomly from
/// `[1, catalog_size - 1]` with duplicates allowed; that overflow mode is
/// deliberate stress input. Quantities are uniform in `[1, 9]`.
pub fn product_lines(n: usize, catalog_size: i64) -> Value {
    let mut rng = rand::thread_rng();
    let mut lines = Vec::with_capacity(n);
    for i in 0..n {
        let id = if n as i64 <= catalog_size {
            i as i64 + 1
        } else {
            rng.gen_range(1..catalog_size)
        };
        lines.push(json!({
            (endpoints::PRODUCT_ID): id,
            (endpoints::PRODUCT_QUANTITY): rng.gen_range(1..=9),
        }));
    }
    Value::Array(lines)
}

/// A single-line product list with explicitly supplied, possibly invalid
/// or sentinel, id and quantity values. Used by negative tests.
pub fn custom_line(id: Value, quantity: Value) -> Value {
    json!([{
        (endpoints::PRODUCT_ID): id,
        (endpoints::PRODUCT_QUANTITY): quantity,
    }])
}

/// A single line missing its product id
pub fn line_without_id(quantity: Value) -> Value {
    json!([{ (endpoints::PRODUCT_QUANTITY): quantity }])
}

/// A single line missing its quantity
pub fn line_without_quantity(id: Value) -> Value {
    json!([{ (endpoints::PRODUCT_ID): id }])
}

/// `carts/add` request body
pub fn add_cart_payload(user_id: Value, products: Value) -> Value {
    json!({
        (endpoints::USER_ID): user_id,
        (endpoints::PRODUCTS_FIELD): products,
    })
}

/// `carts/add` request body missing the user id entirely
pub fn add_cart_payload_without_user(products: Value) -> Value {
    json!({ (endpoints::PRODUCTS_FIELD): products })
}

/// `carts/{id}` update request body. A `None` merge omits the field,
/// which the service treats the same as `merge: false` (replace).
pub fn update_cart_payload(merge: Option<bool>, products: Value) -> Value {
    match merge {
        Some(merge) => json!({
            (endpoints::MERGE): merge,
            (endpoints::PRODUCTS_FIELD): products,
        }),
        None => json!({ (endpoints::PRODUCTS_FIELD): products }),
    }
}

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Recompute every per-line and cart-level total and compare exactly.
///
/// Per line: `total == quantity * price` and
/// `discounted == round(quantity * price * (100 - discount) / 100)`,
/// rounded half-to-even like the service. At the cart level the reported
/// line values must sum to the reported aggregates. No tolerance window:
/// a rounding-rule disagreement must surface as a failure, not pass
/// silently.
pub fn verify_cart(cart: &Cart) -> bool {
    let mut total_products: i64 = 0;
    let mut total_quantity: i64 = 0;
    let mut total = Decimal::ZERO;
    let mut discounted_total = Decimal::ZERO;

    for line in &cart.products {
        let line_total = Decimal::from(line.quantity) * line.price;
        let discounted = (line_total * (HUNDRED - line.discount_percentage) / HUNDRED).round();
        if line_total != line.total || discounted != line.discounted_price {
            return false;
        }

        total_products += 1;
        total_quantity += line.quantity;
        total += line.total;
        discounted_total += line.discounted_price;
    }

    cart.total == total
        && cart.discounted_total == discounted_total
        && cart.total_products == total_products
        && cart.total_quantity == total_quantity
}
