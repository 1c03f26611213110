//! Tuya MCU datapoint values.
//!
//! The transport hands us already-decoded `(dp, value)` pairs. This module
//! models the typed payloads and how they coerce into ZCL attribute values.

use crate::error::{QuirkError, Result};
use crate::zcl::{AttributeDef, AttributeType, AttributeValue};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr};

/// Datapoint type code as carried in the Tuya MCU protocol.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, FromRepr, Serialize, Deserialize,
)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DpType {
    Raw = 0x00,
    Bool = 0x01,
    Value = 0x02,
    String = 0x03,
    Enum = 0x04,
    Bitmap = 0x05,
}

/// A decoded datapoint payload.
#[derive(Clone, Debug, PartialEq)]
pub enum DpValue {
    Raw(Vec<u8>),
    Bool(bool),
    /// Integer datapoint. Signed so that decoders can surface negative readings.
    Value(i64),
    String(String),
    Enum(u8),
    Bitmap(u32),
}

impl DpValue {
    pub fn dp_type(&self) -> DpType {
        match self {
            DpValue::Raw(_) => DpType::Raw,
            DpValue::Bool(_) => DpType::Bool,
            DpValue::Value(_) => DpType::Value,
            DpValue::String(_) => DpType::String,
            DpValue::Enum(_) => DpType::Enum,
            DpValue::Bitmap(_) => DpType::Bitmap,
        }
    }

    /// Coerce into a value of the attribute's declared type.
    ///
    /// No silent conversions: bool only from `Bool`, unsigned integers only
    /// from `Value` within range, enums from `Enum`, bitmaps from `Bitmap`.
    pub fn to_attribute(&self, def: &AttributeDef) -> Result<AttributeValue> {
        let mismatch = || QuirkError::TypeMismatch {
            attribute: def.name,
            expected: def.attr_type,
            found: self.dp_type(),
        };
        let out_of_range = |value: i64| QuirkError::OutOfRange {
            attribute: def.name,
            expected: def.attr_type,
            value,
        };

        match (def.attr_type, self) {
            (AttributeType::Bool, DpValue::Bool(b)) => Ok(AttributeValue::Bool(*b)),
            (AttributeType::U8 | AttributeType::U16 | AttributeType::U32, DpValue::Value(v)) => {
                let raw = u32::try_from(*v).map_err(|_| out_of_range(*v))?;
                AttributeValue::from_unsigned(def.attr_type, raw).ok_or(out_of_range(*v))
            }
            (AttributeType::Enum8 | AttributeType::Enum16, DpValue::Enum(e)) => {
                AttributeValue::from_unsigned(def.attr_type, *e as u32).ok_or(mismatch())
            }
            (AttributeType::Bitmap16, DpValue::Bitmap(b)) => {
                AttributeValue::from_unsigned(def.attr_type, *b).ok_or(out_of_range(*b as i64))
            }
            _ => Err(mismatch()),
        }
    }
}

/// A datapoint report as published on the MQTT input topic.
///
/// ```json
/// {"dp": 101, "type": "value", "value": 50}
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DpReport {
    pub dp: u8,
    #[serde(rename = "type")]
    pub dp_type: DpType,
    pub value: serde_json::Value,
}

impl DpReport {
    /// Interpret the JSON payload according to the declared datapoint type.
    pub fn decode(&self) -> Result<DpValue> {
        let invalid = || {
            QuirkError::InvalidReport(format!(
                "dp {} declared as {} but value is {}",
                self.dp, self.dp_type, self.value
            ))
        };

        let value = match self.dp_type {
            DpType::Raw => DpValue::Raw(serde_json::from_value(self.value.clone())?),
            DpType::Bool => DpValue::Bool(self.value.as_bool().ok_or_else(invalid)?),
            DpType::Value => DpValue::Value(self.value.as_i64().ok_or_else(invalid)?),
            DpType::String => DpValue::String(self.value.as_str().ok_or_else(invalid)?.to_string()),
            DpType::Enum => {
                let e = self.value.as_u64().ok_or_else(invalid)?;
                DpValue::Enum(u8::try_from(e).map_err(|_| invalid())?)
            }
            DpType::Bitmap => {
                let b = self.value.as_u64().ok_or_else(invalid)?;
                DpValue::Bitmap(u32::try_from(b).map_err(|_| invalid())?)
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIGHT: AttributeDef = AttributeDef::new(0xEF65, "light_intensity", AttributeType::U32);
    const REMINDER: AttributeDef = AttributeDef::new(0xEF68, "cleaning_reminder", AttributeType::Bool);

    #[test]
    fn test_value_into_unsigned() {
        assert_eq!(
            DpValue::Value(50).to_attribute(&LIGHT).unwrap(),
            AttributeValue::U32(50)
        );
    }

    #[test]
    fn test_negative_value_is_out_of_range() {
        let err = DpValue::Value(-1).to_attribute(&LIGHT).unwrap_err();
        assert!(matches!(err, QuirkError::OutOfRange { value: -1, .. }));

        let err = DpValue::Value(i64::from(u32::MAX) + 1)
            .to_attribute(&LIGHT)
            .unwrap_err();
        assert!(matches!(err, QuirkError::OutOfRange { .. }));
    }

    #[test]
    fn test_no_silent_coercion() {
        assert!(matches!(
            DpValue::Bool(true).to_attribute(&LIGHT),
            Err(QuirkError::TypeMismatch { found: DpType::Bool, .. })
        ));
        assert!(matches!(
            DpValue::Value(1).to_attribute(&REMINDER),
            Err(QuirkError::TypeMismatch { found: DpType::Value, .. })
        ));
        assert_eq!(
            DpValue::Bool(true).to_attribute(&REMINDER).unwrap(),
            AttributeValue::Bool(true)
        );
    }

    #[test]
    fn test_decode_report_json() {
        let report: DpReport =
            serde_json::from_str(r#"{"dp": 101, "type": "value", "value": 50}"#).unwrap();
        assert_eq!(report.dp, 101);
        assert_eq!(report.decode().unwrap(), DpValue::Value(50));

        let report: DpReport =
            serde_json::from_str(r#"{"dp": 104, "type": "bool", "value": true}"#).unwrap();
        assert_eq!(report.decode().unwrap(), DpValue::Bool(true));
    }

    #[test]
    fn test_decode_report_type_disagreement() {
        let report: DpReport =
            serde_json::from_str(r#"{"dp": 104, "type": "bool", "value": 3}"#).unwrap();
        assert!(matches!(report.decode(), Err(QuirkError::InvalidReport(_))));

        let report: DpReport =
            serde_json::from_str(r#"{"dp": 7, "type": "enum", "value": 300}"#).unwrap();
        assert!(matches!(report.decode(), Err(QuirkError::InvalidReport(_))));
    }

    #[test]
    fn test_dp_type_codes() {
        assert_eq!(DpType::from_repr(0x02), Some(DpType::Value));
        assert_eq!(DpType::from_repr(0x09), None);
        assert_eq!(DpType::Bitmap.to_string(), "bitmap");
        assert_eq!("value".parse::<DpType>().unwrap(), DpType::Value);
    }
}
