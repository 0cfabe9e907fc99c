/*!
 A sink for the non-fatal conditions found while decoding.

 The decoder is permissive: quirks in the header, the allocator, the tree, or a single field
 are recorded here and decoding continues. Callers decide whether to print or ignore them.
*/

use std::fmt::{Display, Formatter, Result};

use crate::error::field::FieldError;

/// A condition that does not stop decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The first header word was not `0x00000001`
    Alignment(u32),
    /// The magic word was not `Bud1`
    Magic(u32),
    /// The allocator offset and its repeat differ
    AllocatorOffsets(u32, u32),
    /// The word after the allocator's block count was not zero
    AllocatorReserved(u32),
    /// The allocator directory holds a key other than `DSDB`: `(key, block id)`
    DirectoryKey(String, u32),
    /// The master block's fifth word was not `0x00001000`
    MasterReserved(u32),
    /// A node sits deeper than the master block's declared tree height: `(depth, height)`
    TreeDepth(usize, u32),
    /// The master block declared a different number of records: `(declared, found)`
    RecordCount(u32, usize),
    /// The master block declared a different number of nodes: `(declared, found)`
    NodeCount(u32, usize),
    /// An embedded store sits deeper than the nesting limit and is shown as hex
    EmbeddedTooDeep(usize),
    /// A field value could not be interpreted
    Field {
        /// The record the field belongs to
        name: String,
        /// The field code
        code: String,
        /// What went wrong
        error: FieldError,
    },
}

impl Display for Warning {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            Warning::Alignment(word) => write!(fmt, "Alignment int {word:x} not 0x00000001"),
            Warning::Magic(word) => write!(fmt, "Magic bytes {word:x} not 0x42756431 (Bud1)"),
            Warning::AllocatorOffsets(first, repeat) => {
                write!(fmt, "Allocator offsets {first:x} and {repeat:x} unequal")
            }
            Warning::AllocatorReserved(word) => {
                write!(fmt, "Second int of allocator {word:x} not 0x00000000")
            }
            Warning::DirectoryKey(key, id) => write!(
                fmt,
                "Directory contains non-'DSDB' key {key:?} and value {id:x}"
            ),
            Warning::MasterReserved(word) => {
                write!(fmt, "Fifth int of master {word:x} not 0x00001000")
            }
            Warning::TreeDepth(depth, height) => {
                write!(fmt, "Node at depth {depth} exceeds tree height {height}")
            }
            Warning::RecordCount(declared, found) => {
                write!(fmt, "Master block declares {declared} records, found {found}")
            }
            Warning::NodeCount(declared, found) => {
                write!(fmt, "Master block declares {declared} nodes, found {found}")
            }
            Warning::EmbeddedTooDeep(limit) => {
                write!(fmt, "Embedded store nested more than {limit} levels deep, shown as hex")
            }
            Warning::Field { name, code, error } => {
                write!(fmt, "Record {name:?} field {code}: {error}")
            }
        }
    }
}

/// Collects [`Warning`]s in the order they were found
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
    /// Number of embedded stores enclosing the values being decoded
    embedded_depth: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning
    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Move every warning from `other` into this sink
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn embedded_depth(&self) -> usize {
        self.embedded_depth
    }

    /// An empty sink for a store embedded one level below this one
    pub fn nested(&self) -> Self {
        Self {
            warnings: vec![],
            embedded_depth: self.embedded_depth + 1,
        }
    }
}
