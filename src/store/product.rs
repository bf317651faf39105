//! Product entity and request payloads.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::store::error::StoreError;

/// Identifier assigned by the store.
pub type ProductId = u64;

/// Largest integer an f64 represents exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A product record as held in the collection and returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Whole prices go out as JSON integers (`1500`, not `1500.0`).
/// Non-finite prices are written by serde_json as `null`.
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// Keeps an explicit `null` distinguishable from an absent field.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Body of `POST /products`.
///
/// Fields stay untyped JSON so that missing and falsy values can be told
/// apart from values that only need coercion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
}

impl NewProduct {
    /// Check both fields are present and truthy, then coerce them.
    pub fn validate(&self) -> Result<(String, f64), StoreError> {
        let (Some(name), Some(price)) = (&self.name, &self.price) else {
            return Err(StoreError::MissingFields);
        };
        if !is_truthy(name) || !is_truthy(price) {
            return Err(StoreError::MissingFields);
        }
        Ok((coerce_name(name), coerce_price(price)))
    }
}

/// Body of `PUT /products/{id}`. Only fields present in the body are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
}

impl ProductPatch {
    /// Apply the supplied fields to `product`, coercing each one.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = coerce_name(name);
        }
        if let Some(price) = &self.price {
            product.price = coerce_price(price);
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render any JSON value as text the way a JavaScript `String()` call does.
fn coerce_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER => {
                (f as i64).to_string()
            }
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_name(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Convert any JSON value to a number the way a JavaScript `Number()` call does.
///
/// `null` and `false` are 0, `true` is 1, strings go through
/// [`string_to_number`], arrays through their text form. Values with no
/// numeric reading become NaN.
fn coerce_price(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&coerce_name(value)),
        Value::Object(_) => f64::NAN,
    }
}

/// Numeric reading of a string: trimmed, blank is 0, accepts decimal and
/// exponent forms, `Infinity`, and unsigned `0x`/`0o`/`0b` literals.
fn string_to_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }

    // Rust also accepts "inf" and "nan" spellings, which are not numbers here.
    let decimal_chars = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal_chars {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

/// Normalize a path segment to a product id.
///
/// A segment names the product whose id equals its numeric reading
/// (`"2"`, `"02"`, `"2.0"`, `"0x2"`). Returns `None` for anything that cannot
/// name a product.
pub fn parse_product_id(raw: &str) -> Option<ProductId> {
    if let Ok(id) = raw.trim().parse::<ProductId>() {
        return (id > 0).then_some(id);
    }

    let value = string_to_number(raw);
    if value.is_finite() && value.fract() == 0.0 && value >= 1.0 && value <= MAX_EXACT_INTEGER {
        Some(value as ProductId)
    } else {
        None
    }
}

#[cfg(test)]
impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            price: Some(Value::from(price)),
        }
    }
}

#[cfg(test)]
impl ProductPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            price: None,
        }
    }

    pub fn price(price: f64) -> Self {
        Self {
            name: None,
            price: Some(Value::from(price)),
        }
    }
}
