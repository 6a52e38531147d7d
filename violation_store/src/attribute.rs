use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use bigdecimal::{BigDecimal, ToPrimitive};
use serde_json::{Map, Number, Value};

/// A raw DynamoDB item.
pub type Item = HashMap<String, AttributeValue>;

/// An item converted to JSON, ready to serialize into a response body.
pub type Record = Map<String, Value>;

pub const TIMESTAMP: &str = "timestamp";

/// Converts a DynamoDB number string to JSON. Integral values become JSON
/// integers, everything else a float.
pub fn number_to_json(n: &str) -> Value {
    let decimal = match BigDecimal::from_str(n.trim()) {
        Ok(d) => d,
        Err(_) => return Value::String(n.to_string())
    };
    if decimal.is_integer() {
        if let Some(i) = decimal.to_i64() {
            return Value::from(i)
        }
        if let Some(u) = decimal.to_u64() {
            return Value::from(u)
        }
    }
    match decimal.to_f64().and_then(Number::from_f64) {
        Some(f) => Value::Number(f),
        None => Value::String(n.to_string())
    }
}

/// Binary attributes have no JSON form and yield `None`.
pub fn attribute_to_json(value: &AttributeValue) -> Option<Value> {
    match value {
        AttributeValue::S(s) => Some(Value::String(s.to_owned())),
        AttributeValue::N(n) => Some(number_to_json(n)),
        AttributeValue::Bool(b) => Some(Value::Bool(*b)),
        AttributeValue::Null(_) => Some(Value::Null),
        AttributeValue::L(list) => Some(Value::Array(
            list.iter().filter_map(attribute_to_json).collect()
        )),
        AttributeValue::M(map) => Some(Value::Object(item_to_record(map))),
        AttributeValue::Ss(set) => Some(Value::Array(
            set.iter().map(|s| Value::String(s.to_owned())).collect()
        )),
        AttributeValue::Ns(set) => Some(Value::Array(
            set.iter().map(|n| number_to_json(n)).collect()
        )),
        _ => None
    }
}

pub fn item_to_record(item: &Item) -> Record {
    item.iter()
        .filter_map(|(k, v)| attribute_to_json(v).map(|json| (k.to_owned(), json)))
        .collect()
}

pub fn decimal_attribute(value: &BigDecimal) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

fn timestamp_of(record: &Record) -> f64 {
    record.get(TIMESTAMP).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Orders records by `timestamp`, newest first. Records without one sort as
/// zero; equal timestamps keep their incoming order.
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| timestamp_of(b).total_cmp(&timestamp_of(a)));
}
