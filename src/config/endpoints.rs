//! Endpoint paths and wire-level field names of the service under test.
//!
//! Paths are relative to the configured base URL. Field names are
//! case-sensitive on the wire; negative tests deliberately send
//! misspelled variants, so every request builder goes through these
//! constants instead of inline literals.

/* Endpoint paths */
pub const AUTH_LOGIN: &str = "auth/login";
pub const USERS: &str = "users";
pub const PRODUCTS: &str = "products";
pub const CARTS: &str = "carts";
pub const CARTS_USER: &str = "carts/user";
pub const CARTS_ADD: &str = "carts/add";

/* auth/login request fields */
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
/// Token TTL request field, in minutes
pub const EXPIRES_IN_MINS: &str = "expiresInMins";

/* carts request fields */
pub const USER_ID: &str = "userId";
pub const PRODUCTS_FIELD: &str = "products";
pub const PRODUCT_ID: &str = "id";
pub const PRODUCT_QUANTITY: &str = "quantity";
/// Update mode: true merges submitted lines with the existing ones,
/// false or absent replaces them.
pub const MERGE: &str = "merge";
