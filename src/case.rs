//! Key case conversion: request keys camelCase -> snake_case (storage), response keys snake_case -> camelCase (client).

use crate::model::Record;
use serde_json::{Map, Value};

/// "image_url" -> "imageUrl", "created_at" -> "createdAt"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// "imageUrl" -> "image_url", "heroButtonBgColor" -> "hero_button_bg_color"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Validated camelCase input to a storage record.
pub fn to_record(input: Map<String, Value>) -> Record {
    input
        .into_iter()
        .map(|(k, v)| (to_snake_case(&k), v))
        .collect()
}

/// Storage record to the camelCase shape sent to clients.
pub fn to_api(record: Record) -> Value {
    Value::Object(
        record
            .into_iter()
            .map(|(k, v)| (to_camel_case(&k), v))
            .collect(),
    )
}

pub fn to_api_many(records: Vec<Record>) -> Vec<Value> {
    records.into_iter().map(to_api).collect()
}
