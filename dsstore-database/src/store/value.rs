/*!
 The primitive value encodings used by record entries.

 Every entry value is preceded by a four character type code that selects one of these encodings.
*/

use std::fmt::{Display, Formatter};

use crate::{error::store::StoreError, store::reader::StoreReader, util::bytes::to_hex};

/// Type codes that can precede an entry value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// `bool`: a single byte
    Bool,
    /// `shor`: a 16-bit integer stored in 4 bytes
    Short,
    /// `long`: a 32-bit integer
    Long,
    /// `comp`: a 64-bit integer
    Comp,
    /// `dutc`: a 64-bit timestamp in 1/65536 seconds since 1904
    Dutc,
    /// `type`: a four character code
    Type,
    /// `blob`: length-prefixed bytes
    Blob,
    /// `ustr`: length-prefixed UTF-16 text
    Ustr,
    /// Any type code we do not know how to read
    Unknown(String),
}

impl DataType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "bool" => Self::Bool,
            "shor" => Self::Short,
            "long" => Self::Long,
            "comp" => Self::Comp,
            "dutc" => Self::Dutc,
            "type" => Self::Type,
            "blob" => Self::Blob,
            "ustr" => Self::Ustr,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// A decoded entry value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    Bool(bool),
    /// `shor` and `long` values
    Int32(i32),
    /// `comp` and `dutc` values
    Int64(i64),
    /// A four character code from a `type` value
    Type(String),
    Blob(Vec<u8>),
    /// Text from a `ustr` value
    Text(String),
}

impl RecordValue {
    /// The name used when describing this kind of value to the user
    pub fn kind(&self) -> &'static str {
        match self {
            RecordValue::Bool(_) => "bool",
            RecordValue::Int32(_) | RecordValue::Int64(_) => "int",
            RecordValue::Type(_) => "type",
            RecordValue::Blob(_) => "bytes",
            RecordValue::Text(_) => "str",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RecordValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integers of either width
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RecordValue::Int32(value) => Some(*value as i64),
            RecordValue::Int64(value) => Some(*value),
            _ => None,
        }
    }

    /// Text from either a `ustr` or a `type` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordValue::Type(value) | RecordValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RecordValue::Blob(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for RecordValue {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordValue::Bool(value) => write!(fmt, "{value}"),
            RecordValue::Int32(value) => write!(fmt, "{value}"),
            RecordValue::Int64(value) => write!(fmt, "{value}"),
            RecordValue::Type(value) | RecordValue::Text(value) => write!(fmt, "{value}"),
            RecordValue::Blob(value) => write!(fmt, "{}", to_hex(value)),
        }
    }
}

/// Read a type code and the value that follows it.
///
/// An unknown type code is fatal: the length of the value cannot be known, so nothing after it can be read.
pub fn read_value(reader: &mut StoreReader) -> Result<RecordValue, StoreError> {
    match DataType::from_tag(&reader.read_tag()?) {
        DataType::Bool => Ok(RecordValue::Bool(reader.read_u8()? & 0x01 != 0)),
        // `shor` values still occupy four bytes
        DataType::Short | DataType::Long => Ok(RecordValue::Int32(reader.read_u32()? as i32)),
        DataType::Comp | DataType::Dutc => Ok(RecordValue::Int64(reader.read_u64()? as i64)),
        DataType::Type => Ok(RecordValue::Type(reader.read_tag()?)),
        DataType::Blob => {
            let length = reader.read_u32()? as usize;
            Ok(RecordValue::Blob(reader.read_exact_bytes(length)?.to_vec()))
        }
        DataType::Ustr => {
            let length = reader.read_u32()? as usize;
            Ok(RecordValue::Text(reader.read_utf16(length)?))
        }
        DataType::Unknown(tag) => Err(StoreError::UnrecognizedDataType(tag)),
    }
}
