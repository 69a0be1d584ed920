// Request payload builders must emit the exact wire field names; the
// service rejects any other casing, and several negative contract tests
// depend on being able to produce malformed variants deliberately.

use serde_json::json;
use storecheck::auth::login_payload;
use storecheck::carts::{
    add_cart_payload, add_cart_payload_without_user, custom_line, line_without_id,
    line_without_quantity, product_lines, update_cart_payload,
};

#[test]
fn add_cart_payload_shape() {
    let body = add_cart_payload(json!(97), product_lines(3, 100));
    assert_eq!(body["userId"], 97);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 3);
    for line in products {
        assert!(line.get("id").is_some());
        assert!(line.get("quantity").is_some());
        assert_eq!(line.as_object().unwrap().len(), 2);
    }
}

#[test]
fn add_cart_payload_can_omit_the_user() {
    let body = add_cart_payload_without_user(product_lines(1, 100));
    assert!(body.get("userId").is_none());
    assert!(body.get("products").is_some());
}

#[test]
fn custom_line_carries_sentinel_values_verbatim() {
    let lines = custom_line(json!("string_value"), json!(null));
    let line = &lines.as_array().unwrap()[0];
    assert_eq!(line["id"], "string_value");
    assert_eq!(line["quantity"], json!(null));
}

#[test]
fn partial_lines_drop_exactly_one_field() {
    let no_id = line_without_id(json!(2));
    assert!(no_id[0].get("id").is_none());
    assert_eq!(no_id[0]["quantity"], 2);

    let no_quantity = line_without_quantity(json!(7));
    assert_eq!(no_quantity[0]["id"], 7);
    assert!(no_quantity[0].get("quantity").is_none());
}

#[test]
fn update_payload_merge_modes() {
    let merged = update_cart_payload(Some(true), product_lines(2, 100));
    assert_eq!(merged["merge"], true);

    let replaced = update_cart_payload(Some(false), product_lines(2, 100));
    assert_eq!(replaced["merge"], false);

    let implicit = update_cart_payload(None, product_lines(2, 100));
    assert!(implicit.get("merge").is_none());
    assert!(implicit.get("products").is_some());
}

#[test]
fn login_payload_ttl_is_optional() {
    let plain = login_payload("emilys", "emilyspass", None);
    let keys: Vec<&str> = plain.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["password", "username"]);

    let with_ttl = login_payload("emilys", "emilyspass", Some(60));
    assert_eq!(with_ttl["expiresInMins"], 60);
}
