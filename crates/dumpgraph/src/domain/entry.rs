#![forbid(unsafe_code)]

use serde::Serialize;

pub const NAME_SIZE: &str = "size";
pub const NAME_OBJECT_COUNT: &str = "object_count";
pub const NAME_VIRTUAL_SIZE: &str = "virtual_size";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Units {
    #[serde(rename = "bytes")]
    Bytes,
    #[serde(rename = "objects")]
    Objects,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryValue {
    Scalar(u64),
    String(String),
}

/// A single named attribute of an allocator dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub units: Units,
    pub value: EntryValue,
}

impl Entry {
    pub fn scalar(units: Units, value: u64) -> Self {
        Self {
            units,
            value: EntryValue::Scalar(value),
        }
    }

    pub fn string(units: Units, value: impl Into<String>) -> Self {
        Self {
            units,
            value: EntryValue::String(value.into()),
        }
    }

    pub fn as_scalar(&self) -> Option<u64> {
        match self.value {
            EntryValue::Scalar(v) => Some(v),
            EntryValue::String(_) => None,
        }
    }
}
