/*!
 Errors that can happen when walking the structure of a `.DS_Store` file. These abort the whole decode.
*/

use std::fmt::{Display, Formatter, Result};

/// Errors that can happen when parsing the header, allocator, or B-tree of a `.DS_Store` file
#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A read would pass the end of the buffer: `(requested end, buffer length)`
    OutOfBounds(usize, usize),
    /// The allocator's directory does not name the B-tree master block
    MissingDirectoryKey(String),
    /// A block id that has no entry in the offset table: `(block id, table length)`
    InvalidBlockId(u32, usize),
    /// A value type code the decoder does not understand
    UnrecognizedDataType(String),
    /// Child links nest deeper than any real tree can
    TreeTooDeep(usize),
}

impl Display for StoreError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            StoreError::OutOfBounds(idx, len) => {
                write!(fmt, "Index {idx:x} is outside of range {len:x}!")
            }
            StoreError::MissingDirectoryKey(key) => {
                write!(fmt, "Key '{key}' not found in table of contents")
            }
            StoreError::InvalidBlockId(id, len) => {
                write!(fmt, "Block id {id} is not in the offset table of {len} blocks")
            }
            StoreError::UnrecognizedDataType(tag) => {
                write!(fmt, "Unrecognized data type {tag:?}")
            }
            StoreError::TreeTooDeep(depth) => {
                write!(fmt, "B-tree nodes nest past depth {depth}, the tree is likely cyclic")
            }
        }
    }
}
