//! Boundary validation for stored collection data.
//!
//! Stored arrays may be stale, hand-edited, or written by an older client.
//! Sanitizing never fails: entries that are not objects or have no usable
//! `id` are dropped. Product fields that do not parse stay in the entry's
//! extra map untouched, so writing the collection back loses nothing.

use kacamata_core::{ProductId, ProductSnapshot, Translation};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::debug;

use super::cart::CartItem;

/// Sanitize a stored wishlist or compare array.
#[must_use]
pub fn sanitize_products(raw: Value) -> Vec<ProductSnapshot> {
    objects(raw).into_iter().filter_map(product_from_object).collect()
}

/// Sanitize a stored cart array.
///
/// Besides the product checks, `quantity` is coerced to a positive integer
/// and `selectedSize` / `selectedColor` to strings.
#[must_use]
pub fn sanitize_cart(raw: Value) -> Vec<CartItem> {
    objects(raw)
        .into_iter()
        .filter_map(|mut object| {
            let quantity = object.remove("quantity").map_or(1, |q| coerce_quantity(&q));
            let selected_size = coerce_string(object.remove("selectedSize"));
            let selected_color = coerce_string(object.remove("selectedColor"));

            product_from_object(object).map(|product| CartItem {
                product,
                quantity,
                selected_size,
                selected_color,
            })
        })
        .collect()
}

/// Build a snapshot from an untrusted object.
///
/// Returns `None` unless `id` is a non-empty string.
#[must_use]
pub fn product_from_object(mut object: Map<String, Value>) -> Option<ProductSnapshot> {
    let id = match object.remove("id") {
        Some(Value::String(id)) => ProductId::parse(id).ok()?,
        _ => return None,
    };

    let name = take_parsed(&mut object, "name", parse_name);
    let slug = take_parsed(&mut object, "slug", parse_string);
    let brand = take_parsed(&mut object, "brand", parse_string);
    let image = take_parsed(&mut object, "image", parse_string);
    let price = take_parsed(&mut object, "price", coerce_decimal);

    Some(ProductSnapshot {
        id,
        name,
        slug,
        brand,
        image,
        price,
        extra: object,
    })
}

fn objects(raw: Value) -> Vec<Map<String, Value>> {
    let Value::Array(entries) = raw else {
        debug!("Stored collection is not an array, ignoring it");
        return Vec::new();
    };

    let total = entries.len();
    let objects: Vec<_> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(object) => Some(object),
            _ => None,
        })
        .collect();

    if objects.len() < total {
        debug!(dropped = total - objects.len(), "Dropped non-object entries");
    }
    objects
}

/// Remove `key` only if `parse` accepts its value.
fn take_parsed<T>(
    object: &mut Map<String, Value>,
    key: &str,
    parse: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let parsed = parse(object.get(key)?)?;
    object.remove(key);
    Some(parsed)
}

fn parse_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn parse_name(value: &Value) -> Option<Translation> {
    match value {
        Value::String(text) => Some(Translation::Legacy(text.clone())),
        Value::Object(_) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

/// Coerce a stored quantity to an integer of at least 1.
///
/// Numbers and numeric strings are floored; anything without a finite
/// numeric reading becomes 1.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)] // Range is checked before the cast
fn coerce_quantity(value: &Value) -> u32 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => {
            let floored = n.floor();
            if floored < 1.0 {
                1
            } else if floored >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                floored as u32
            }
        }
        _ => 1,
    }
}

fn coerce_string(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_owned(),
        _ => return None,
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
