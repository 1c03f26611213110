use crate::tuya::DpType;
use crate::zcl::AttributeType;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum QuirkError {
    #[error("Datapoint {0} is mapped more than once")]
    DuplicateDatapoint(u8),

    #[error("Unknown facade: {0}")]
    UnknownFacade(&'static str),

    #[error("Cluster {cluster} has no attribute {attribute}")]
    UnknownAttribute {
        cluster: &'static str,
        attribute: String,
    },

    #[error("Attribute {attribute} expects {expected}, got {found} datapoint")]
    TypeMismatch {
        attribute: &'static str,
        expected: AttributeType,
        found: DpType,
    },

    #[error("Attribute {attribute} expects {expected}, got {found}")]
    WrongAttributeType {
        attribute: &'static str,
        expected: AttributeType,
        found: AttributeType,
    },

    #[error("Value {value} is out of range for {attribute} ({expected})")]
    OutOfRange {
        attribute: &'static str,
        expected: AttributeType,
        value: i64,
    },

    #[error("Attribute {0} is read-only")]
    ReadOnlyAttribute(&'static str),

    #[error("Listener {listener} failed: {reason}")]
    ListenerFailed {
        listener: &'static str,
        reason: String,
    },

    #[error("Invalid datapoint report: {0}")]
    InvalidReport(String),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuirkError>;
