//! Typed response schemas of the service under test.
//!
//! All structs are deserialize-only: request bodies are assembled as raw
//! JSON by the payload builders in [`crate::carts`] so that negative
//! tests can send deliberately malformed shapes. Field names here are the
//! lowercased wire names; the decoder lowercases response keys before
//! matching, which makes decoding case-insensitive.

use rust_decimal::Decimal;
use serde::Deserialize;

pub mod decode;

pub use decode::{decode_cart, decode_line, decode_message, decode_page, decode_user};

/// A user of the service, as returned by login and profile lookups.
///
/// Deliberately minimal: only the fields the harness needs to select and
/// authenticate the fixture identity. The profile endpoint of the test
/// service exposes the plaintext password, which is exactly what makes an
/// arbitrary existing user usable as the login fixture.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, alias = "accesstoken")]
    pub token: Option<String>,
}

/// A product line nested inside a cart, or a catalog product from the
/// products listing (which lacks the quantity/total fields, hence the
/// defaults).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default, rename = "discountpercentage")]
    pub discount_percentage: Decimal,
    #[serde(default, rename = "discountedprice", alias = "discountedtotal")]
    pub discounted_price: Decimal,
}

/// A cart with its service-computed aggregates.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Cart {
    pub id: i64,
    pub total: Decimal,
    #[serde(rename = "discountedtotal")]
    pub discounted_total: Decimal,
    #[serde(rename = "userid")]
    pub user_id: i64,
    #[serde(rename = "totalproducts")]
    pub total_products: i64,
    #[serde(rename = "totalquantity")]
    pub total_quantity: i64,
    #[serde(default)]
    pub products: Vec<CartLine>,
    /// Present only on delete responses
    #[serde(default, rename = "isdeleted")]
    pub is_deleted: Option<bool>,
}

/// Service-reported error body on 4xx/5xx responses.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InfoMessage {
    pub message: String,
}

/// The `{total, skip, limit, items[]}` envelope returned by every listing
/// endpoint. Exactly one of the three arrays is populated, depending on
/// which endpoint produced the page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Page {
    pub total: i64,
    #[serde(default)]
    pub skip: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub users: Option<Vec<User>>,
    #[serde(default)]
    pub carts: Option<Vec<Cart>>,
    #[serde(default)]
    pub products: Option<Vec<CartLine>>,
}
