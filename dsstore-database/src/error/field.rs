/*!
 Errors that can happen when interpreting a single field of a record.

 These never abort a decode: the interpreter reports them as warnings and renders a fallback line instead.
*/

use std::fmt::{Display, Formatter, Result};

/// Errors that can happen when interpreting the value of a known field code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The value was decoded as a different type: `(expected, found)`
    InvalidType(&'static str, &'static str),
    /// A blob did not have any of the accepted lengths: `(found, accepted)`
    InvalidLength(usize, &'static [usize]),
    /// A sub-type tag inside the value is not one we know: `(kind, tag)`
    UnknownVariant(&'static str, String),
}

impl Display for FieldError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            FieldError::InvalidType(expected, found) => {
                write!(fmt, "expected {expected}, got {found}")
            }
            FieldError::InvalidLength(found, accepted) => {
                write!(fmt, "not of length {accepted:?}, got {found}")
            }
            FieldError::UnknownVariant(kind, tag) => {
                write!(fmt, "unrecognized {kind} type {tag}")
            }
        }
    }
}
