use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use bigdecimal::BigDecimal;
use serde_json::Value;

use crate::attribute::{decimal_attribute, Item, TIMESTAMP};
use crate::error::InputError;

pub const VIOLATION_ID: &str = "violation_id";
pub const CCCD: &str = "cccd";

/// Fingerprint slot on a reader. Digit-only strings are folded into the
/// numeric form so `"97"` and `97` address the same officer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BiometricId {
    Numeric(String),
    Text(String),
}

impl BiometricId {
    pub fn from_json(value: &Value) -> Result<BiometricId, InputError> {
        match value {
            Value::Number(n) => Ok(BiometricId::Numeric(n.to_string())),
            Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                let trimmed = s.trim_start_matches('0');
                Ok(BiometricId::Numeric(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }))
            }
            Value::String(s) => Ok(BiometricId::Text(s.to_owned())),
            Value::Null => Err(InputError::MissingField("finger_id")),
            _ => Err(InputError::UnsupportedType { field: "finger_id" })
        }
    }

    pub fn to_attribute(&self) -> AttributeValue {
        match self {
            BiometricId::Numeric(n) => AttributeValue::N(n.to_owned()),
            BiometricId::Text(s) => AttributeValue::S(s.to_owned())
        }
    }
}

/// Reads a string-like field, accepting numbers as their decimal text.
pub fn string_field(field: &'static str, value: Option<&Value>, default: &str) -> Result<String, InputError> {
    match value {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.to_owned()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(InputError::UnsupportedType { field })
    }
}

/// Reads a reading as an exact decimal. Absent means zero.
pub fn decimal_field(field: &'static str, value: Option<&Value>) -> Result<BigDecimal, InputError> {
    let text = match value {
        None | Some(Value::Null) => return Ok(BigDecimal::from(0)),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => return Err(InputError::InvalidNumber { field, value: other.to_string() })
    };
    BigDecimal::from_str(&text).map_err(|_| InputError::InvalidNumber { field, value: text })
}

/// One logged violation. Written once and never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationRecord {
    pub violation_id: String,
    pub timestamp_millis: i64,
    pub timestamp_human: String,
    pub device_id: String,
    pub officer_id: String,
    pub officer_name: Option<String>,
    pub cccd: String,
    pub alcohol_level: BigDecimal,
    pub heart_rate: BigDecimal,
    pub spo2: BigDecimal,
}

impl ViolationRecord {
    pub fn to_item(&self) -> Item {
        let mut item = HashMap::from([
            (VIOLATION_ID.to_string(), AttributeValue::S(self.violation_id.to_owned())),
            (TIMESTAMP.to_string(), AttributeValue::N(self.timestamp_millis.to_string())),
            ("timestamp_human".to_string(), AttributeValue::S(self.timestamp_human.to_owned())),
            ("device_id".to_string(), AttributeValue::S(self.device_id.to_owned())),
            ("officer_id".to_string(), AttributeValue::S(self.officer_id.to_owned())),
            (CCCD.to_string(), AttributeValue::S(self.cccd.to_owned())),
            ("alcohol_level".to_string(), decimal_attribute(&self.alcohol_level)),
            ("heart_rate".to_string(), decimal_attribute(&self.heart_rate)),
            ("spo2".to_string(), decimal_attribute(&self.spo2)),
        ]);
        if let Some(name) = &self.officer_name {
            item.insert("officer_name".to_string(), AttributeValue::S(name.to_owned()));
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::item_to_record;
    use serde_json::json;

    #[test]
    fn numeric_string_and_integer_fingers_match() {
        let from_str = BiometricId::from_json(&json!("97")).unwrap();
        let from_int = BiometricId::from_json(&json!(97)).unwrap();
        assert_eq!(from_str, from_int);
        assert_eq!(from_str.to_attribute(), AttributeValue::N("97".to_string()));
        assert_eq!(BiometricId::from_json(&json!("007")).unwrap(), BiometricId::Numeric("7".to_string()));
        assert_eq!(BiometricId::from_json(&json!("000")).unwrap(), BiometricId::Numeric("0".to_string()));
    }

    #[test]
    fn non_digit_fingers_stay_text() {
        assert_eq!(BiometricId::from_json(&json!("F-12")).unwrap(), BiometricId::Text("F-12".to_string()));
        assert_eq!(BiometricId::from_json(&json!("-5")).unwrap(), BiometricId::Text("-5".to_string()));
        assert_eq!(BiometricId::from_json(&json!("")).unwrap(), BiometricId::Text(String::new()));
        assert_eq!(BiometricId::from_json(&Value::Null), Err(InputError::MissingField("finger_id")));
        assert!(BiometricId::from_json(&json!([1])).is_err());
    }

    #[test]
    fn decimal_fields_are_exact() {
        assert_eq!(decimal_field("alc", None).unwrap(), BigDecimal::from(0));
        assert_eq!(decimal_field("alc", Some(&json!(0.25))).unwrap().to_string(), "0.25");
        assert_eq!(decimal_field("bpm", Some(&json!("72"))).unwrap().to_string(), "72");
        assert!(matches!(
            decimal_field("spo2", Some(&json!("high"))),
            Err(InputError::InvalidNumber { field: "spo2", .. })
        ));
        assert!(decimal_field("spo2", Some(&json!(true))).is_err());
    }

    #[test]
    fn string_fields_accept_numbers() {
        assert_eq!(string_field("cccd", Some(&json!(123456)), "x").unwrap(), "123456");
        assert_eq!(string_field("cccd", None, "Unknown_CCCD").unwrap(), "Unknown_CCCD");
        assert!(string_field("cccd", Some(&json!({})), "x").is_err());
    }

    #[test]
    fn readings_round_trip_through_item() {
        let record = ViolationRecord {
            violation_id: "v-1".to_string(),
            timestamp_millis: 1_700_000_000_123,
            timestamp_human: "2023-11-14 22:13:20".to_string(),
            device_id: "esp32-01".to_string(),
            officer_id: "CB-01".to_string(),
            officer_name: None,
            cccd: "123456".to_string(),
            alcohol_level: BigDecimal::from_str("0.25").unwrap(),
            heart_rate: BigDecimal::from(97),
            spo2: BigDecimal::from_str("97.5").unwrap(),
        };
        let item = record.to_item();
        assert!(!item.contains_key("officer_name"));
        let json = item_to_record(&item);
        assert_eq!(json["heart_rate"], json!(97));
        assert_eq!(json["spo2"], json!(97.5));
        assert_eq!(json["alcohol_level"], json!(0.25));
        assert_eq!(json["timestamp"], json!(1_700_000_000_123i64));
    }
}
