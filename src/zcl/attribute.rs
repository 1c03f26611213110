//! Typed ZCL attribute values and declarations.

use strum::Display;

/// Wire type of a ZCL attribute.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum AttributeType {
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "uint8")]
    U8,
    #[strum(serialize = "uint16")]
    U16,
    #[strum(serialize = "uint32")]
    U32,
    #[strum(serialize = "enum8")]
    Enum8,
    #[strum(serialize = "enum16")]
    Enum16,
    #[strum(serialize = "bitmap16")]
    Bitmap16,
}

impl AttributeType {
    /// Largest value representable by an integer type, `None` for bool.
    pub fn max_value(self) -> Option<u32> {
        match self {
            AttributeType::Bool => None,
            AttributeType::U8 | AttributeType::Enum8 => Some(u8::MAX as u32),
            AttributeType::U16 | AttributeType::Enum16 | AttributeType::Bitmap16 => {
                Some(u16::MAX as u32)
            }
            AttributeType::U32 => Some(u32::MAX),
        }
    }
}

/// A typed attribute value as stored by a cluster facade.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    Enum8(u8),
    Enum16(u16),
    Bitmap16(u16),
}

impl AttributeValue {
    /// Build a value of the given integer type, checking its range.
    ///
    /// Returns `None` for bool or when `value` does not fit.
    pub fn from_unsigned(attr_type: AttributeType, value: u32) -> Option<Self> {
        let max = attr_type.max_value()?;
        if value > max {
            return None;
        }
        Some(match attr_type {
            AttributeType::Bool => return None,
            AttributeType::U8 => AttributeValue::U8(value as u8),
            AttributeType::U16 => AttributeValue::U16(value as u16),
            AttributeType::U32 => AttributeValue::U32(value),
            AttributeType::Enum8 => AttributeValue::Enum8(value as u8),
            AttributeType::Enum16 => AttributeValue::Enum16(value as u16),
            AttributeType::Bitmap16 => AttributeValue::Bitmap16(value as u16),
        })
    }

    pub fn attr_type(&self) -> AttributeType {
        match self {
            AttributeValue::Bool(_) => AttributeType::Bool,
            AttributeValue::U8(_) => AttributeType::U8,
            AttributeValue::U16(_) => AttributeType::U16,
            AttributeValue::U32(_) => AttributeType::U32,
            AttributeValue::Enum8(_) => AttributeType::Enum8,
            AttributeValue::Enum16(_) => AttributeType::Enum16,
            AttributeValue::Bitmap16(_) => AttributeType::Bitmap16,
        }
    }

    /// Numeric view of integer-like values.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            AttributeValue::Bool(_) => None,
            AttributeValue::U8(v) | AttributeValue::Enum8(v) => Some(v as u32),
            AttributeValue::U16(v) | AttributeValue::Enum16(v) | AttributeValue::Bitmap16(v) => {
                Some(v as u32)
            }
            AttributeValue::U32(v) => Some(v),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            AttributeValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

/// How an attribute may be mutated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    /// Updated from device reports
    Reportable,
    /// Fixed by the quirk, never written after construction
    Constant,
}

/// Static declaration of one attribute on a cluster.
#[derive(Clone, Copy, Debug)]
pub struct AttributeDef {
    pub id: u16,
    pub name: &'static str,
    pub attr_type: AttributeType,
    pub access: Access,
    pub manufacturer_specific: bool,
}

impl AttributeDef {
    pub const fn new(id: u16, name: &'static str, attr_type: AttributeType) -> Self {
        Self {
            id,
            name,
            attr_type,
            access: Access::Reportable,
            manufacturer_specific: false,
        }
    }

    pub const fn constant(mut self) -> Self {
        self.access = Access::Constant;
        self
    }

    pub const fn manufacturer_specific(mut self) -> Self {
        self.manufacturer_specific = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unsigned_checks_width() {
        assert_eq!(
            AttributeValue::from_unsigned(AttributeType::U16, 350),
            Some(AttributeValue::U16(350))
        );
        assert_eq!(AttributeValue::from_unsigned(AttributeType::U8, 256), None);
        assert_eq!(AttributeValue::from_unsigned(AttributeType::Bool, 1), None);
        assert_eq!(
            AttributeValue::from_unsigned(AttributeType::U32, u32::MAX),
            Some(AttributeValue::U32(u32::MAX))
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(AttributeType::U32.to_string(), "uint32");
        assert_eq!(AttributeType::Bitmap16.to_string(), "bitmap16");
        assert_eq!(AttributeValue::Enum16(0x2A).attr_type(), AttributeType::Enum16);
    }
}
